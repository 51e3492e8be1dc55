pub mod analyses;
pub mod analysis_service;
pub mod cross_source_join;
pub mod csv_loader;
pub mod view_session;
