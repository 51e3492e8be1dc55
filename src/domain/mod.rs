pub mod analysis;
pub mod analysis_config;
pub mod catalog;
pub mod error;
pub mod fallback;

// CSV ingestion module
pub mod csv;
