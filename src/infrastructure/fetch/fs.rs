use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::ResourceFetcher;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Reads exports below a local data root
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a catalog path onto the data root, refusing to leave it
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AppError::ValidationError(format!(
                "Resource path escapes the data root: {}",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        debug!(path = %full_path.display(), "Reading export from disk");

        tokio::fs::read(&full_path).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => AppError::NotFound(path.to_string()),
            _ => AppError::IoError(format!("Failed to read {}: {}", path, err)),
        })
    }

    fn origin(&self) -> String {
        self.root.display().to_string()
    }
}
