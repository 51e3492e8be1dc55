use super::ResourceFetcher;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Fetches exports served as static assets
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url,
        })
    }

    /// Resolve a catalog path; spaces and accents are percent-encoded
    pub fn resource_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::ValidationError(format!("Invalid resource path {}: {}", path, e)))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.resource_url(path)?;
        debug!(url = %url, "Fetching export");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::NotFound(format!("HTTP {} - {}", status.as_u16(), path)));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn origin(&self) -> String {
        self.base_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url_encodes_path() {
        let fetcher = HttpFetcher::new("http://localhost:5173/", 5).unwrap();
        let url = fetcher
            .resource_url("/data/seo/Apparence dans les resultats de recherche.csv")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5173/data/seo/Apparence%20dans%20les%20resultats%20de%20recherche.csv"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            HttpFetcher::new("not a url", 5),
            Err(AppError::ConfigError(_))
        ));
    }
}
