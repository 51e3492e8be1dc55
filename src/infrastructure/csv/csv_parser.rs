// ============================================================
// CSV PARSER
// ============================================================
// Decode export bytes, drop metadata lines, parse header-first tables

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::debug;

use crate::domain::csv::{CsvField, CsvRow, IngestionConfig};
use crate::domain::error::{AppError, Result};

/// CSV parser for marketing exports
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter override (auto-detected when `None`)
    delimiter: Option<u8>,

    /// Leading lines starting with this prefix are skipped
    comment_prefix: String,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: None,
            comment_prefix: "#".to_string(),
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &IngestionConfig) -> Self {
        Self {
            delimiter: config.delimiter.map(|c| c as u8),
            comment_prefix: config.comment_prefix.clone(),
        }
    }

    /// Decode raw bytes. A BOM selects UTF-8/UTF-16; otherwise UTF-8 with a
    /// Windows-1252 fallback for legacy exports.
    pub fn decode(bytes: &[u8]) -> String {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return text.into_owned();
        }

        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                debug!("Export is not UTF-8, decoding as Windows-1252");
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                text.into_owned()
            }
        }
    }

    /// Parse raw export bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<CsvRow>> {
        let content = Self::decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<CsvRow>> {
        let table = self.strip_leading_metadata(content);
        if table.is_empty() {
            return Ok(Vec::new());
        }

        let delimiter = self
            .delimiter
            .unwrap_or_else(|| Self::detect_delimiter(table));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::None)
            .flexible(true) // Allow rows with different lengths
            .from_reader(table.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(Self::normalize_header)
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(index, &headers, &record));
        }

        Ok(rows)
    }

    /// Skip leading metadata lines and blank lines; the header starts after them
    fn strip_leading_metadata<'a>(&self, content: &'a str) -> &'a str {
        let mut offset = 0;
        for line in content.split('\n') {
            if !line.starts_with(self.comment_prefix.as_str()) && !line.trim().is_empty() {
                return &content[offset..];
            }
            offset += line.len() + 1;
        }
        ""
    }

    /// Missing trailing fields become empty strings; extra fields are ignored
    fn parse_row(index: usize, headers: &[String], record: &StringRecord) -> CsvRow {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| CsvField::new(header.clone(), record.get(idx).unwrap_or("")))
            .collect();

        CsvRow::new(index, fields)
    }

    /// Non-breaking spaces become spaces, whitespace runs collapse, ends trimmed
    pub fn normalize_header(name: &str) -> String {
        name.trim_start_matches('\u{feff}')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe).
    /// Delimiters inside quoted fields are not counted.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<&str> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| Self::count_unquoted(line, delimiter))
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }

    fn count_unquoted(line: &str, delimiter: u8) -> usize {
        let mut in_quotes = false;
        let mut count = 0;
        for &byte in line.as_bytes() {
            if byte == b'"' {
                in_quotes = !in_quotes;
            } else if byte == delimiter && !in_quotes {
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "Campagne,Clics,Coût\nPmax,120,\"9 595,51 €\"\nSearch,80,\"0,32 €\"";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields.len(), 3);
        assert_eq!(rows[0].get("Coût"), Some("9 595,51 €"));
        assert_eq!(rows[1].get("Campagne"), Some("Search"));
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn test_skips_leading_comments_and_blank_lines() {
        let content = "# Rapport sur les campagnes\n# 3 août 2025 - 29 janv. 2026\n\nJour,Clics\nLundi,4\n";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].column_names(), vec!["Jour", "Clics"]);
        assert_eq!(rows[0].get("Clics"), Some("4"));
    }

    #[test]
    fn test_only_comments_yields_no_rows() {
        let rows = CsvParser::new().parse_content("# a\n# b\n\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_short_rows_are_padded() {
        let content = "a,b,c\n1\n4,5,6,7\n";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[0].get("b"), Some(""));
        assert_eq!(rows[0].get("c"), Some(""));
        assert_eq!(rows[1].fields.len(), 3);
    }

    #[test]
    fn test_header_whitespace_is_normalized() {
        let content = " Mot clé pour le Réseau\u{a0}de\u{a0}Recherche ,Clics\nfer forgé,3\n";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows[0].get("Mot clé pour le Réseau de Recherche"), Some("fer forgé"));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let content = "Pays,CTR\n France ,\"1,5 %\"\n";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows[0].get("Pays"), Some(" France "));
        assert_eq!(rows[0].get("CTR"), Some("1,5 %"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a\tb\n\"1,2\"\t\"3,4,5\""), b'\t');
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Coût\tClics\n1,5 €\t3\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let rows = CsvParser::new().parse_bytes(&bytes).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Coût"), Some("1,5 €"));
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Coût" with a Windows-1252 'û'
        let bytes = b"Co\xfbt\n3\n";
        assert_eq!(CsvParser::decode(bytes), "Coût\n3\n");
    }
}
