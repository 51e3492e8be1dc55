// ============================================================
// CROSS-SOURCE JOIN
// ============================================================
// Match rows of two independently shaped exports on a normalized key

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::domain::csv::{CsvRow, NormalizedKey};

/// Picks the join value of a row: the named column, or the row's first
/// column when the named one is absent or exactly `""`. A whitespace-only
/// value is kept and normalizes to an empty key, so the row does not join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySelector {
    column: String,
}

impl KeySelector {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Raw label as it appears in the export
    pub fn raw<'r>(&self, row: &'r CsvRow) -> Option<&'r str> {
        row.get(&self.column)
            .filter(|v| !v.is_empty())
            .or_else(|| row.first_value())
    }

    /// Normalized key, `None` when the label is empty
    pub fn key(&self, row: &CsvRow) -> Option<NormalizedKey> {
        self.raw(row).and_then(NormalizedKey::non_empty)
    }
}

/// One A row matched with the B row sharing its key
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedPair<'a, K> {
    pub key: K,
    pub left: &'a CsvRow,
    pub right: &'a CsvRow,
}

/// Inner join on normalized keys. Output follows `left` order; duplicate
/// keys in `right` resolve to the last row.
pub fn join<'a>(
    left: &'a [CsvRow],
    left_key: &KeySelector,
    right: &'a [CsvRow],
    right_key: &KeySelector,
) -> Vec<JoinedPair<'a, NormalizedKey>> {
    join_by(left, right, |row| left_key.key(row), |row| right_key.key(row))
}

/// [`join`] with arbitrary key extractors. Rows whose extractor returns
/// `None` never match.
pub fn join_by<'a, K, FL, FR>(
    left: &'a [CsvRow],
    right: &'a [CsvRow],
    left_key: FL,
    right_key: FR,
) -> Vec<JoinedPair<'a, K>>
where
    K: Eq + Hash,
    FL: Fn(&CsvRow) -> Option<K>,
    FR: Fn(&CsvRow) -> Option<K>,
{
    let mut index: HashMap<K, &'a CsvRow> = HashMap::with_capacity(right.len());
    for row in right {
        if let Some(key) = right_key(row) {
            index.insert(key, row);
        }
    }

    let pairs: Vec<JoinedPair<'a, K>> = left
        .iter()
        .filter_map(|row| {
            let key = left_key(row)?;
            let matched = *index.get(&key)?;
            Some(JoinedPair {
                key,
                left: row,
                right: matched,
            })
        })
        .collect();

    debug!(
        left = left.len(),
        right = right.len(),
        indexed = index.len(),
        matched = pairs.len(),
        "Joined sources"
    );
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::parse_locale_number;

    fn rows(pairs: &[(&str, &str)]) -> Vec<CsvRow> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (kw, clicks))| CsvRow::from_pairs(i, [("kw", *kw), ("Clics", *clicks)]))
            .collect()
    }

    fn clicks(row: &CsvRow) -> f64 {
        parse_locale_number(row.get("Clics")).unwrap_or(0.0)
    }

    #[test]
    fn test_accent_and_case_insensitive_match() {
        let ads = rows(&[("fer forgé", "120")]);
        let seo = rows(&[("Fer Forgé", "340")]);
        let selector = KeySelector::new("kw");

        let pairs = join(&ads, &selector, &seo, &selector);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].key.as_str(), "fer forge");
        assert_eq!(clicks(pairs[0].left) + clicks(pairs[0].right), 460.0);
    }

    #[test]
    fn test_output_follows_left_order() {
        let ads = rows(&[("b", "1"), ("a", "2"), ("c", "3")]);
        let seo = rows(&[("c", "30"), ("a", "20"), ("b", "10")]);
        let seo_reordered = rows(&[("a", "20"), ("b", "10"), ("c", "30")]);
        let selector = KeySelector::new("kw");

        let keys = |pairs: Vec<JoinedPair<'_, NormalizedKey>>| {
            pairs
                .into_iter()
                .map(|p| p.key.to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(keys(join(&ads, &selector, &seo, &selector)), vec!["b", "a", "c"]);
        assert_eq!(
            keys(join(&ads, &selector, &seo, &selector)),
            keys(join(&ads, &selector, &seo_reordered, &selector))
        );
    }

    #[test]
    fn test_duplicate_right_keys_last_wins() {
        let ads = rows(&[("poignée", "5")]);
        let seo = rows(&[("Poignée", "1"), ("poignee", "9")]);
        let selector = KeySelector::new("kw");

        let pairs = join(&ads, &selector, &seo, &selector);

        assert_eq!(pairs.len(), 1);
        assert_eq!(clicks(pairs[0].right), 9.0);
    }

    #[test]
    fn test_unmatched_and_empty_keys_dropped() {
        let ads = vec![
            CsvRow::from_pairs(0, [("kw", ""), ("Clics", "")]),
            CsvRow::from_pairs(1, [("kw", "portail"), ("Clics", "4")]),
        ];
        let seo = vec![
            CsvRow::from_pairs(0, [("kw", ""), ("Clics", "")]),
            CsvRow::from_pairs(1, [("kw", "garde-corps"), ("Clics", "2")]),
        ];
        let selector = KeySelector::new("kw");

        assert!(join(&ads, &selector, &seo, &selector).is_empty());
    }

    #[test]
    fn test_selector_falls_back_to_first_column() {
        let row = CsvRow::from_pairs(0, [("Requête", "Rampe Escalier"), ("Clics", "3")]);

        let selector = KeySelector::new("Requêtes les plus fréquentes");
        assert_eq!(selector.raw(&row), Some("Rampe Escalier"));
        assert_eq!(selector.key(&row).unwrap().as_str(), "rampe escalier");

        let empty = CsvRow::from_pairs(0, [("kw", "  Rampe  "), ("Requêtes les plus fréquentes", "")]);
        assert_eq!(selector.raw(&empty), Some("  Rampe  "));
    }

    #[test]
    fn test_whitespace_key_does_not_fall_back() {
        let selector = KeySelector::new("kw");
        let ads = vec![CsvRow::from_pairs(0, [("Campagne", "Brand"), ("kw", "   ")])];
        let seo = vec![CsvRow::from_pairs(0, [("kw", "brand")])];

        assert_eq!(selector.raw(&ads[0]), Some("   "));
        assert_eq!(selector.key(&ads[0]), None);
        assert!(join(&ads, &selector, &seo, &selector).is_empty());
    }

    #[test]
    fn test_join_by_custom_key() {
        let pages = vec![CsvRow::from_pairs(0, [("path", "/contact"), ("Vues", "40")])];
        let seo = vec![CsvRow::from_pairs(
            0,
            [("url", "https://example.fr/contact"), ("Clics", "7")],
        )];

        let pairs = join_by(
            &pages,
            &seo,
            |row| row.get_non_empty("path").map(str::to_string),
            |row| {
                row.get_non_empty("url")
                    .and_then(|u| u.strip_prefix("https://example.fr"))
                    .map(str::to_string)
            },
        );

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].key, "/contact");
    }
}
