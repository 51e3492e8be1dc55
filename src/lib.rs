pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use tracing_subscriber::EnvFilter;

pub use application::AnalysisService;
pub use domain::analysis::AnalysisReport;
pub use domain::catalog::{CatalogEntry, FileCatalog, ViewKind};
pub use domain::error::{AppError, Result};
pub use infrastructure::config::AppConfig;

/// Log to stderr, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
