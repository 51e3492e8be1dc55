// ============================================================
// NORMALIZED JOIN KEY
// ============================================================
// Case-folded, accent-stripped, whitespace-collapsed labels

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block, dropped after NFD decomposition
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Join key derived from a raw label (keyword, query, device, day name).
/// Used only for matching; never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Lowercase, decompose, strip combining marks, collapse whitespace, trim
    pub fn new(raw: &str) -> Self {
        let folded: String = raw
            .to_lowercase()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .collect();

        Self(folded.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Normalized key, or `None` when the label normalizes to nothing
    pub fn non_empty(raw: &str) -> Option<Self> {
        let key = Self::new(raw);
        (!key.is_empty()).then_some(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
