//! When and to whom Ads were shown

use std::collections::BTreeMap;

use super::columns::{AGE_BRACKET, CLICKS, DAY, IMPRESSIONS, SEX, START_HOUR};
use crate::domain::analysis::{AgeBracket, Demographics, HeatmapDay, TimeHeatmap};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{parse_integer_prefix, CsvRow};
use crate::domain::fallback::FallbackAudit;

pub const WEEK_DAYS: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];
const HOURS: usize = 24;

/// Hour of day from labels like "07 h"
fn start_hour(raw: &str) -> Option<usize> {
    parse_integer_prefix(raw)
        .and_then(|h| usize::try_from(h).ok())
        .filter(|h| *h < HOURS)
}

/// Clicks per weekday and start hour. A repeated (day, hour) keeps the
/// last row read.
pub fn time_heatmap(rows: &[CsvRow], config: &AnalysisConfig) -> TimeHeatmap {
    let mut audit = FallbackAudit::new(config.fallback);
    let mut grid = [[0.0_f64; HOURS]; 7];
    let mut max = 0.0_f64;

    for row in rows {
        let Some(day) = row
            .get(DAY)
            .and_then(|d| WEEK_DAYS.iter().position(|w| *w == d.trim()))
        else {
            continue;
        };
        let Some(hour) = row.get(START_HOUR).and_then(start_hour) else {
            continue;
        };

        let mut reader = audit.reader(row);
        let clicks = reader.number(CLICKS);
        if let Some(clicks) = reader.finish(clicks) {
            grid[day][hour] = clicks;
            max = max.max(clicks);
        }
    }

    let days = WEEK_DAYS
        .iter()
        .zip(grid)
        .map(|(day, hours)| HeatmapDay {
            day: day.to_string(),
            hours: hours.to_vec(),
        })
        .collect();

    TimeHeatmap { days, max, audit }
}

/// Impressions per age bracket and sex, brackets in ascending order
pub fn demographics(rows: &[CsvRow], config: &AnalysisConfig) -> Demographics {
    let mut audit = FallbackAudit::new(config.fallback);
    let mut brackets: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for row in rows {
        let Some(age) = row.get_non_empty(AGE_BRACKET) else {
            continue;
        };
        let sex = row.get(SEX).unwrap_or_default().trim().to_string();

        let mut reader = audit.reader(row);
        let impressions = reader.number(IMPRESSIONS);
        if let Some(impressions) = reader.finish(impressions) {
            brackets
                .entry(age.trim().to_string())
                .or_default()
                .insert(sex, impressions);
        }
    }

    Demographics {
        brackets: brackets
            .into_iter()
            .map(|(age, impressions_by_sex)| AgeBracket {
                age,
                impressions_by_sex,
            })
            .collect(),
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(i: usize, day: &str, hour: &str, clicks: &str) -> CsvRow {
        CsvRow::from_pairs(i, [(DAY, day), (START_HOUR, hour), (CLICKS, clicks)])
    }

    #[test]
    fn test_start_hour() {
        assert_eq!(start_hour("07 h"), Some(7));
        assert_eq!(start_hour("00 h"), Some(0));
        assert_eq!(start_hour("23 h"), Some(23));
        assert_eq!(start_hour("24 h"), None);
        assert_eq!(start_hour("h"), None);
    }

    #[test]
    fn test_time_heatmap() {
        let rows = vec![
            slot(0, "Lundi", "07 h", "12"),
            slot(1, "Dimanche", "23 h", "40"),
            slot(2, "Lundi", "07 h", "5"),
            slot(3, "Funday", "07 h", "99"),
            slot(4, "Mardi", "--", "99"),
        ];

        let report = time_heatmap(&rows, &AnalysisConfig::default());

        assert_eq!(report.days.len(), 7);
        assert_eq!(report.days[0].day, "Lundi");
        assert_eq!(report.days[0].hours.len(), 24);
        assert_eq!(report.days[0].hours[7], 5.0);
        assert_eq!(report.days[6].hours[23], 40.0);
        assert_eq!(report.days[1].hours.iter().sum::<f64>(), 0.0);
        assert_eq!(report.max, 40.0);
    }

    #[test]
    fn test_demographics() {
        let row = |i: usize, age: &str, sex: &str, impressions: &str| {
            CsvRow::from_pairs(i, [(AGE_BRACKET, age), (SEX, sex), (IMPRESSIONS, impressions)])
        };
        let rows = vec![
            row(0, "35-44", "Femme", "3 813"),
            row(1, "18-24", "Homme", "1 200"),
            row(2, "35-44", "Homme", "5 020"),
            row(3, "", "Homme", "7"),
        ];

        let report = demographics(&rows, &AnalysisConfig::default());

        assert_eq!(report.brackets.len(), 2);
        assert_eq!(report.brackets[0].age, "18-24");
        assert_eq!(report.brackets[1].impressions_by_sex.get("Femme"), Some(&3813.0));
        assert_eq!(report.brackets[1].impressions_by_sex.get("Homme"), Some(&5020.0));
    }
}
