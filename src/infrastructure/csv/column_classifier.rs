// ============================================================
// COLUMN CLASSIFIER
// ============================================================
// Detect numeric-like columns from a leading row sample

use crate::domain::csv::{parse_locale_number, ColumnProfile, CsvRow, IngestionConfig};

/// Heuristic column classifier. Not a schema: empty input yields no columns.
pub struct ColumnClassifier {
    config: IngestionConfig,
}

impl ColumnClassifier {
    /// Create a new column classifier
    pub fn new(config: IngestionConfig) -> Self {
        Self { config }
    }

    /// Parse statistics for every column of the first row, in column order
    pub fn profile(&self, rows: &[CsvRow]) -> Vec<ColumnProfile> {
        let Some(first) = rows.first() else {
            return Vec::new();
        };

        let sample = &rows[..rows.len().min(self.config.sample_rows)];

        first
            .column_names()
            .into_iter()
            .map(|column| {
                let parsed = sample
                    .iter()
                    .filter(|row| parse_locale_number(row.get(column)).is_some())
                    .count();
                ColumnProfile::new(column.to_string(), sample.len(), parsed, &self.config)
            })
            .collect()
    }

    /// Names of the numeric-like columns, in column order
    pub fn numeric_columns(&self, rows: &[CsvRow]) -> Vec<String> {
        self.profile(rows)
            .into_iter()
            .filter(|p| p.kind.is_numeric())
            .map(|p| p.name)
            .collect()
    }
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new(IngestionConfig::default())
    }
}
