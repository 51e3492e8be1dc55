use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::IngestionConfig;
use crate::domain::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "adlens.toml";
pub const ENV_PREFIX: &str = "ADLENS_";

/// Where exports are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Local directory the catalog paths are relative to
    pub data_root: PathBuf,
    /// When set, exports are fetched over HTTP from this origin instead
    pub base_url: Option<String>,
    pub http_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("public"),
            base_url: None,
            http_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub ingestion: IngestionConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Defaults, then the TOML file, then `ADLENS_` env vars (`__` nests:
    /// `ADLENS_ANALYSIS__CTR_TOP_N=20`)
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let file = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(config_file))
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.http_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "source.http_timeout_secs must be > 0".to_string(),
            ));
        }
        self.ingestion
            .validate()
            .map_err(|e| AppError::ConfigError(format!("ingestion: {}", e)))?;
        self.analysis
            .validate()
            .map_err(|e| AppError::ConfigError(format!("analysis: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::FallbackPolicy;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "adlens.toml",
                r#"
                [source]
                data_root = "/srv/exports"

                [analysis]
                ctr_top_n = 5
                fallback = "exclude"
                "#,
            )?;
            jail.set_env("ADLENS_ANALYSIS__CTR_TOP_N", "8");
            jail.set_env("ADLENS_INGESTION__SAMPLE_ROWS", "50");

            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.source.data_root, PathBuf::from("/srv/exports"));
            assert_eq!(config.analysis.ctr_top_n, 8);
            assert_eq!(config.analysis.fallback, FallbackPolicy::Exclude);
            assert_eq!(config.ingestion.sample_rows, 50);
            assert_eq!(config.analysis.page_top_n, 50);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("ADLENS_INGESTION__NUMERIC_THRESHOLD", "2.0");
            let err = AppConfig::load(None).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}
