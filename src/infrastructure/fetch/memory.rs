use std::collections::HashMap;
use std::time::Duration;

use super::ResourceFetcher;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;

/// Serves exports from memory, e.g. assets embedded in a client
#[derive(Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(path.to_string(), body.into());
        self
    }

    /// Delay every fetch of `path`, to model a slow origin
    pub fn with_delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }

        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::NotFound(path.to_string()))
    }

    fn origin(&self) -> String {
        format!("memory ({} resources)", self.resources.len())
    }
}
