// ============================================================
// INGESTION CONFIGURATION
// ============================================================
// Loader and column classifier settings

use serde::{Deserialize, Serialize};

/// Configuration for CSV loading and column classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Number of leading rows sampled by the column classifier (default: 20)
    pub sample_rows: usize,

    /// A column is numeric when its parse ratio is strictly above this (default: 0.6)
    pub numeric_threshold: f64,

    /// Delimiter override; auto-detected when unset
    pub delimiter: Option<char>,

    /// Leading lines starting with this prefix are export metadata (default: "#")
    pub comment_prefix: String,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            sample_rows: 20,
            numeric_threshold: 0.6,
            delimiter: None,
            comment_prefix: "#".to_string(),
        }
    }
}

impl IngestionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rows == 0 {
            return Err("sample_rows must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.numeric_threshold) {
            return Err("numeric_threshold must be between 0.0 and 1.0".to_string());
        }
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' {
                return Err(format!("delimiter {:?} is not a usable ASCII separator", delimiter));
            }
        }
        if self.comment_prefix.is_empty() {
            return Err("comment_prefix must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(IngestionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = IngestionConfig {
            numeric_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = IngestionConfig {
            delimiter: Some('é'),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
