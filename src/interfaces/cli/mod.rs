//! `adlens` command line: browse the catalog, inspect an export, run a view

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use figment::providers::Serialized;
use serde::Serialize;
use tracing::debug;

use crate::application::AnalysisService;
use crate::domain::csv::{ColumnProfile, CsvRow};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::fetch::fetcher_from_config;

#[derive(Parser, Debug)]
#[command(name = "adlens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cross-source analysis of Google Ads, GA4 and Search Console exports")]
pub struct Cli {
    /// TOML config file (default: adlens.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Local directory holding the `/data/...` exports
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,

    /// Fetch exports over HTTP from this origin instead
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Missing-metric policy: `zero` or `exclude`
    #[arg(long, global = true)]
    fallback: Option<String>,

    /// Single-line JSON output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog sections and entries
    Catalog {
        /// Only this section
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Load one export and profile its columns
    Load {
        /// Resource path, e.g. /data/seo/Pays.csv
        path: String,
        /// Rows to print
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },
    /// Run the view of a catalog entry
    Analyze {
        section: String,
        id: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadSummary<'a> {
    path: &'a str,
    row_count: usize,
    columns: Vec<ColumnProfile>,
    preview: &'a [CsvRow],
}

impl Cli {
    /// Config file, env, then command-line overrides
    fn app_config(&self) -> Result<AppConfig> {
        let mut figment = AppConfig::figment(self.config.as_deref());
        if let Some(root) = &self.data_root {
            figment = figment.merge(Serialized::default("source.data_root", root));
        }
        if let Some(base_url) = &self.base_url {
            figment = figment.merge(Serialized::default("source.base_url", base_url));
        }
        if let Some(policy) = &self.fallback {
            figment = figment.merge(Serialized::default("analysis.fallback", policy));
        }
        AppConfig::from_figment(&figment)
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        }
        .map_err(|e| AppError::Internal(format!("Failed to serialize output: {}", e)))?;
        println!("{}", json);
        Ok(())
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.app_config()?;
    debug!(?config, "Configuration loaded");

    let fetcher = fetcher_from_config(&config.source)?;
    let service = AnalysisService::new(fetcher, &config);

    match &cli.command {
        Commands::Catalog { section } => match section {
            Some(key) => {
                let section = service
                    .catalog()
                    .section(key)
                    .ok_or_else(|| AppError::NotFound(format!("catalog section {}", key)))?;
                cli.print(section)
            }
            None => cli.print(service.catalog()),
        },
        Commands::Load { path, rows } => {
            let loaded = service.load(path).await?;
            let summary = LoadSummary {
                path,
                row_count: loaded.len(),
                columns: service.classifier().profile(&loaded),
                preview: &loaded[..loaded.len().min(*rows)],
            };
            cli.print(&summary)
        }
        Commands::Analyze { section, id } => {
            let entry = service.entry(section, id)?.clone();
            let report = service.analyze(&entry).await?;
            cli.print(&report)
        }
    }
}
