// ============================================================
// COLUMN KIND ENUM
// ============================================================
// Whether a column holds numbers or labels

use serde::{Deserialize, Serialize};

/// Column kind detected from a row sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Most sampled values parse as locale numbers (clicks, cost, CTR)
    Numeric,

    /// Everything else (campaign names, keywords, dates, device labels)
    Label,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "Numeric"),
            ColumnKind::Label => write!(f, "Label"),
        }
    }
}
