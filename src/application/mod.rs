pub mod use_cases;

pub use use_cases::analysis_service::AnalysisService;
pub use use_cases::cross_source_join::{join, join_by, JoinedPair, KeySelector};
pub use use_cases::csv_loader::CsvLoader;
pub use use_cases::view_session::{RequestToken, ViewSession};
