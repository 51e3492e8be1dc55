//! Missing-metric policy. Aggregations never coerce an unparseable cell to
//! zero silently: every fallback goes through a [`MetricReader`] and is counted
//! in the [`FallbackAudit`] attached to the analysis result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::csv::{parse_locale_number, CsvRow, ParsedValue};

/// What an aggregation does with an absent or unparseable metric cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Count the metric as 0 and keep the record
    #[default]
    Zero,
    /// Drop the whole record
    Exclude,
}

/// Per-analysis record of every metric fallback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackAudit {
    pub policy: FallbackPolicy,
    /// Column name -> number of cells that fell back
    pub missing: BTreeMap<String, usize>,
    /// Records dropped under [`FallbackPolicy::Exclude`]
    pub excluded_rows: usize,
}

impl FallbackAudit {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn record(&mut self, column: &str) {
        *self.missing.entry(column.to_string()).or_insert(0) += 1;
    }

    /// Total number of cells that fell back
    pub fn total(&self) -> usize {
        self.missing.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }

    /// Merge another audit (e.g. the companion side of a join)
    pub fn absorb(&mut self, other: FallbackAudit) {
        for (column, count) in other.missing {
            *self.missing.entry(column).or_insert(0) += count;
        }
        self.excluded_rows += other.excluded_rows;
    }

    pub fn reader<'a>(&'a mut self, row: &'a CsvRow) -> MetricReader<'a> {
        MetricReader {
            audit: self,
            row,
            excluded: false,
        }
    }
}

/// Reads metrics from one row, applying the audit's policy
pub struct MetricReader<'a> {
    audit: &'a mut FallbackAudit,
    row: &'a CsvRow,
    excluded: bool,
}

impl<'a> MetricReader<'a> {
    /// Locale-parsed metric
    pub fn number(&mut self, column: &str) -> f64 {
        self.with(column, parse_locale_number)
    }

    /// Metric parsed with a column-specific parser
    pub fn with(&mut self, column: &str, parse: impl Fn(Option<&str>) -> ParsedValue) -> f64 {
        match parse(self.row.get(column)) {
            Some(value) => value,
            None => {
                self.audit.record(column);
                if self.audit.policy == FallbackPolicy::Exclude {
                    self.excluded = true;
                }
                0.0
            }
        }
    }

    /// Raw text of a column (no fallback accounting)
    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.row.get(column)
    }

    /// Emit the record unless a metric fell back under `Exclude`
    pub fn finish<T>(self, record: T) -> Option<T> {
        if self.excluded {
            self.audit.excluded_rows += 1;
            None
        } else {
            Some(record)
        }
    }
}
