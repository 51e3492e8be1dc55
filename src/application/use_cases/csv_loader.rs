// ============================================================
// CSV LOADER USE CASE
// ============================================================
// Fetch an export, decode it, reject HTML fallbacks, parse rows

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::csv::{CsvRow, IngestionConfig};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::fetch::ResourceFetcher;

/// Loads catalog resources into rows
#[derive(Clone)]
pub struct CsvLoader {
    fetcher: Arc<dyn ResourceFetcher>,
    parser: CsvParser,
}

impl CsvLoader {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, config: &IngestionConfig) -> Self {
        Self {
            fetcher,
            parser: CsvParser::from_config(config),
        }
    }

    /// Load one resource. Missing resources, HTTP errors and HTML bodies
    /// served in place of a CSV all surface as `NotFound(path)`.
    pub async fn load(&self, path: &str) -> Result<Vec<CsvRow>> {
        let start = Instant::now();

        let bytes = self.fetcher.fetch(path).await?;
        let content = CsvParser::decode(&bytes);

        if looks_like_html(&content) {
            warn!(path, origin = %self.fetcher.origin(), "Received an HTML page instead of CSV");
            return Err(AppError::NotFound(path.to_string()));
        }

        let rows = self.parser.parse_content(&content).map_err(|e| match e {
            AppError::ParseError(msg) => AppError::ParseError(format!("{}: {}", path, msg)),
            other => other,
        })?;

        info!(
            path,
            rows = rows.len(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded export"
        );
        Ok(rows)
    }

    /// Load a primary export and its companion concurrently.
    /// Either failure fails the pair.
    pub async fn load_pair(
        &self,
        primary: &str,
        companion: &str,
    ) -> Result<(Vec<CsvRow>, Vec<CsvRow>)> {
        debug!(primary, companion, "Loading joined resources");
        tokio::try_join!(self.load(primary), self.load(companion))
    }
}

/// Static hosts answer unknown paths with an index page rather than a 404
pub fn looks_like_html(content: &str) -> bool {
    content.trim_start().starts_with("<!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fetch::MemoryFetcher;

    fn loader(fetcher: MemoryFetcher) -> CsvLoader {
        CsvLoader::new(Arc::new(fetcher), &IngestionConfig::default())
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<!DOCTYPE html><html></html>"));
        assert!(looks_like_html("\n   <!doctype html>"));
        assert!(!looks_like_html("Campagne,Clics\n<b>,1"));
        assert!(!looks_like_html(""));
    }

    #[tokio::test]
    async fn test_load_rows() {
        let fetcher = MemoryFetcher::new().with_resource(
            "/data/ads/a.csv",
            "# Rapport\n# Période\nCampagne;Coût\nPmax;\"9 595,51 €\"\n",
        );
        let rows = loader(fetcher).load("/data/ads/a.csv").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Coût"), Some("9 595,51 €"));
    }

    #[tokio::test]
    async fn test_html_body_is_not_found() {
        let fetcher = MemoryFetcher::new()
            .with_resource("/data/x.csv", "<!DOCTYPE html><html><body>app</body></html>");
        let err = loader(fetcher).load("/data/x.csv").await.unwrap_err();

        assert_eq!(err, AppError::NotFound("/data/x.csv".to_string()));
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let err = loader(MemoryFetcher::new())
            .load("/data/absent.csv")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_load_pair_fails_when_companion_missing() {
        let fetcher = MemoryFetcher::new().with_resource("/a.csv", "k,v\nx,1\n");
        let err = loader(fetcher).load_pair("/a.csv", "/b.csv").await.unwrap_err();

        assert_eq!(err, AppError::NotFound("/b.csv".to_string()));
    }
}
