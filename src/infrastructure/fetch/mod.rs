pub mod fs;
pub mod http;
pub mod memory;

use std::sync::Arc;

use crate::domain::error::Result;
use crate::infrastructure::config::SourceConfig;
use async_trait::async_trait;
pub use fs::FsFetcher;
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;

/// Where export files come from. Paths are catalog paths (`/data/seo/Pays.csv`).
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Raw bytes of a resource. A missing resource is `AppError::NotFound`.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;

    /// Human-readable origin for logs
    fn origin(&self) -> String;
}

/// HTTP when a base URL is configured, otherwise the local data root
pub fn fetcher_from_config(config: &SourceConfig) -> Result<Arc<dyn ResourceFetcher>> {
    match &config.base_url {
        Some(base_url) => Ok(Arc::new(HttpFetcher::new(
            base_url,
            config.http_timeout_secs,
        )?)),
        None => Ok(Arc::new(FsFetcher::new(config.data_root.clone()))),
    }
}
