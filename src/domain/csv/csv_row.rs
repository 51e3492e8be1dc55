// ============================================================
// CSV ROW TYPES
// ============================================================
// Ordered row records produced by the tabular loader

use serde::{Deserialize, Serialize};

use super::number::{parse_locale_number, ParsedValue};

/// A single cell of a CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvField {
    /// Column name (header with whitespace normalized)
    pub name: String,

    /// Raw cell value, verbatim
    pub value: String,
}

impl CsvField {
    /// Create a new CSV field
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single row in a CSV file, fields in file column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    /// Row index (0-based, data rows only)
    pub index: usize,

    /// All fields in this row
    pub fields: Vec<CsvField>,
}

impl CsvRow {
    /// Create a new CSV row
    pub fn new(index: usize, fields: Vec<CsvField>) -> Self {
        Self { index, fields }
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<N, V>(index: usize, pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(name, value)| CsvField::new(name, value))
            .collect();
        Self::new(index, fields)
    }

    /// Raw value of a column. Duplicate headers resolve to the first occurrence.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == column)
            .map(|f| f.value.as_str())
    }

    /// Raw value of a column, `None` when absent or blank
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    /// Value of the first column
    pub fn first_value(&self) -> Option<&str> {
        self.fields.first().map(|f| f.value.as_str())
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Locale-parsed numeric value of a column
    pub fn number(&self, column: &str) -> ParsedValue {
        parse_locale_number(self.get(column))
    }
}
