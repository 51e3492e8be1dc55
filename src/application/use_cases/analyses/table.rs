//! Generic view of any export: rows, numeric columns and a quick chart

use crate::domain::analysis::{ChartPoint, ChartSeries, TableView};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::CsvRow;
use crate::domain::fallback::FallbackAudit;
use crate::infrastructure::csv::ColumnClassifier;

pub fn table_view(
    rows: Vec<CsvRow>,
    classifier: &ColumnClassifier,
    config: &AnalysisConfig,
) -> TableView {
    let mut audit = FallbackAudit::new(config.fallback);

    let columns: Vec<String> = rows
        .first()
        .map(|row| row.column_names().into_iter().map(str::to_string).collect())
        .unwrap_or_default();
    let numeric_columns = classifier.numeric_columns(&rows);

    let chart = chart_axes(&columns, &numeric_columns).map(|(label_column, value_column)| {
        let points = rows
            .iter()
            .take(config.chart_rows)
            .filter_map(|row| {
                let name: String = row
                    .get(&label_column)
                    .unwrap_or_default()
                    .chars()
                    .take(config.chart_label_chars)
                    .collect();
                let mut reader = audit.reader(row);
                let value = reader.number(&value_column);
                reader.finish(ChartPoint { name, value })
            })
            .collect();
        ChartSeries {
            label_column,
            value_column,
            points,
        }
    });

    TableView {
        columns,
        numeric_columns,
        rows,
        chart,
        audit,
    }
}

/// First label column against the first numeric column. Falls back to the
/// first two columns when the classifier finds no such split.
fn chart_axes(columns: &[String], numeric: &[String]) -> Option<(String, String)> {
    if columns.len() < 2 {
        return None;
    }

    let label = columns
        .iter()
        .find(|c| !numeric.contains(c))
        .unwrap_or(&columns[0]);
    let value = numeric
        .iter()
        .find(|c| *c != label)
        .unwrap_or(&columns[1]);

    if label == value {
        return None;
    }
    Some((label.clone(), value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::IngestionConfig;

    fn export() -> Vec<CsvRow> {
        (0..40)
            .map(|i| {
                CsvRow::from_pairs(
                    i,
                    [
                        ("Nom de la campagne", format!("Campagne au nom vraiment très long n°{}", i)),
                        ("Coût", format!("{},50 €", i)),
                        ("Statut", "Active".to_string()),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_table_view_chart() {
        let classifier = ColumnClassifier::new(IngestionConfig::default());
        let view = table_view(export(), &classifier, &AnalysisConfig::default());

        assert_eq!(view.columns, vec!["Nom de la campagne", "Coût", "Statut"]);
        assert_eq!(view.numeric_columns, vec!["Coût"]);
        assert_eq!(view.rows.len(), 40);

        let chart = view.chart.unwrap();
        assert_eq!(chart.label_column, "Nom de la campagne");
        assert_eq!(chart.value_column, "Coût");
        assert_eq!(chart.points.len(), 30);
        assert_eq!(chart.points[0].name.chars().count(), 30);
        assert_eq!(chart.points[3].value, 3.5);
    }

    #[test]
    fn test_table_view_empty() {
        let classifier = ColumnClassifier::new(IngestionConfig::default());
        let view = table_view(Vec::new(), &classifier, &AnalysisConfig::default());

        assert!(view.columns.is_empty());
        assert!(view.chart.is_none());
    }

    #[test]
    fn test_chart_axes_without_numeric_column() {
        let columns = vec!["Page".to_string(), "Titre".to_string()];
        assert_eq!(
            chart_axes(&columns, &[]),
            Some(("Page".to_string(), "Titre".to_string()))
        );
    }
}
