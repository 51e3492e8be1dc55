// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV ingestion
// No I/O, no async

mod column_kind;
mod column_profile;
mod csv_row;
mod ingestion_config;
mod join_key;
mod number;

pub use column_kind::ColumnKind;
pub use column_profile::ColumnProfile;
pub use csv_row::{CsvField, CsvRow};
pub use ingestion_config::IngestionConfig;
pub use join_key::NormalizedKey;
pub use number::{
    parse_currency, parse_decimal_prefix, parse_integer_prefix, parse_locale_number,
    parse_percentage, ParsedValue,
};
