// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding, parsing, and column classification

mod column_classifier;
mod csv_parser;

pub use column_classifier::ColumnClassifier;
pub use csv_parser::CsvParser;
