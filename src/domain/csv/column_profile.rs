// ============================================================
// COLUMN PROFILE
// ============================================================
// Per-column parse statistics over a row sample

use super::{ColumnKind, IngestionConfig};
use serde::{Deserialize, Serialize};

/// Parse statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name
    pub name: String,

    /// Number of sampled rows
    pub sampled: usize,

    /// Number of sampled values accepted by the locale number parser
    pub parsed: usize,

    /// Resulting classification
    pub kind: ColumnKind,
}

impl ColumnProfile {
    /// Classify from counts. Numeric iff `parsed > sampled * threshold` (strict).
    pub fn new(name: String, sampled: usize, parsed: usize, config: &IngestionConfig) -> Self {
        let kind = if parsed as f64 > sampled as f64 * config.numeric_threshold {
            ColumnKind::Numeric
        } else {
            ColumnKind::Label
        };

        Self {
            name,
            sampled,
            parsed,
            kind,
        }
    }

    /// Share of sampled values that parsed (0.0 - 1.0)
    pub fn parse_ratio(&self) -> f64 {
        if self.sampled == 0 {
            0.0
        } else {
            self.parsed as f64 / self.sampled as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let config = IngestionConfig::default();
        // 3 of 5 is exactly 0.6, not above it
        assert_eq!(ColumnProfile::new("a".into(), 5, 3, &config).kind, ColumnKind::Label);
        assert_eq!(ColumnProfile::new("b".into(), 5, 4, &config).kind, ColumnKind::Numeric);
        assert_eq!(ColumnProfile::new("c".into(), 0, 0, &config).kind, ColumnKind::Label);
    }
}
