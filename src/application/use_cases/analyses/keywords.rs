//! Ads keywords against Search Console queries

use super::columns::{ADS_KEYWORD, CLICKS, CTR, SEO_QUERY};
use super::descending;
use crate::application::use_cases::cross_source_join::{join, JoinedPair, KeySelector};
use crate::domain::analysis::{CtrComparison, CtrComparisonRow, KeywordCannibalization, KeywordOverlap};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{
    parse_locale_number, parse_percentage, CsvRow, NormalizedKey, ParsedValue,
};
use crate::domain::fallback::FallbackAudit;

fn keyword_pairs<'a>(ads: &'a [CsvRow], seo: &'a [CsvRow]) -> Vec<JoinedPair<'a, NormalizedKey>> {
    join(
        ads,
        &KeySelector::new(ADS_KEYWORD),
        seo,
        &KeySelector::new(SEO_QUERY),
    )
}

/// Read the same metric on both sides of a pair
fn paired_metric(
    audit: &mut FallbackAudit,
    pair: &JoinedPair<'_, NormalizedKey>,
    column: &str,
    parse: fn(Option<&str>) -> ParsedValue,
) -> Option<(f64, f64)> {
    let mut reader = audit.reader(pair.left);
    let ads = reader.with(column, parse);
    let ads = reader.finish(ads)?;

    let mut reader = audit.reader(pair.right);
    let seo = reader.with(column, parse);
    let seo = reader.finish(seo)?;

    Some((ads, seo))
}

/// Label of a pair as written in one of its exports
fn label(pair: &JoinedPair<'_, NormalizedKey>, row: &CsvRow, column: &str) -> String {
    KeySelector::new(column)
        .raw(row)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| pair.key.to_string())
}

/// Keywords bought on Ads that also bring organic clicks, labelled with the
/// Search Console query
pub fn keyword_cannibalization(
    ads: &[CsvRow],
    seo: &[CsvRow],
    config: &AnalysisConfig,
) -> KeywordCannibalization {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut overlaps: Vec<KeywordOverlap> = keyword_pairs(ads, seo)
        .iter()
        .filter_map(|pair| {
            let (ads_clicks, seo_clicks) = paired_metric(&mut audit, pair, CLICKS, parse_locale_number)?;
            Some(KeywordOverlap {
                keyword: label(pair, pair.right, SEO_QUERY),
                ads_clicks,
                seo_clicks,
                total: ads_clicks + seo_clicks,
            })
        })
        .collect();

    overlaps.sort_by(|a, b| descending(a.total, b.total));

    KeywordCannibalization { overlaps, audit }
}

/// Paid vs organic CTR of shared keywords
pub fn ctr_comparison(ads: &[CsvRow], seo: &[CsvRow], config: &AnalysisConfig) -> CtrComparison {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut rows: Vec<CtrComparisonRow> = keyword_pairs(ads, seo)
        .iter()
        .filter_map(|pair| {
            let (ads_ctr, seo_ctr) = paired_metric(&mut audit, pair, CTR, parse_percentage)?;
            Some(CtrComparisonRow {
                keyword: label(pair, pair.left, ADS_KEYWORD),
                ads_ctr,
                seo_ctr,
            })
        })
        .collect();

    rows.sort_by(|a, b| descending(a.ads_ctr, b.ads_ctr));
    rows.truncate(config.ctr_top_n);

    CtrComparison { rows, audit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::FallbackPolicy;

    fn ads_row(i: usize, keyword: &str, clicks: &str, ctr: &str) -> CsvRow {
        CsvRow::from_pairs(i, [(ADS_KEYWORD, keyword), (CLICKS, clicks), (CTR, ctr)])
    }

    fn seo_row(i: usize, query: &str, clicks: &str, ctr: &str) -> CsvRow {
        CsvRow::from_pairs(i, [(SEO_QUERY, query), (CLICKS, clicks), (CTR, ctr)])
    }

    #[test]
    fn test_cannibalization_sums_clicks() {
        let ads = vec![
            ads_row(0, "fer forgé", "120", "5,1 %"),
            ads_row(1, "portail alu", "10", "2 %"),
            ads_row(2, "garde corps", "80", "3 %"),
        ];
        let seo = vec![
            seo_row(0, "Fer Forgé", "340", "4 %"),
            seo_row(1, "garde  corps", "20", "1 %"),
        ];

        let report = keyword_cannibalization(&ads, &seo, &AnalysisConfig::default());

        assert_eq!(report.overlaps.len(), 2);
        assert_eq!(report.overlaps[0].keyword, "Fer Forgé");
        assert_eq!(report.overlaps[0].total, 460.0);
        assert_eq!(report.overlaps[1].keyword, "garde  corps");
        assert_eq!(report.overlaps[1].total, 100.0);
        assert!(report.audit.is_clean());
    }

    #[test]
    fn test_cannibalization_audits_missing_clicks() {
        let ads = vec![ads_row(0, "rampe", "--", "")];
        let seo = vec![seo_row(0, "Rampe", "3", "")];

        let report = keyword_cannibalization(&ads, &seo, &AnalysisConfig::default());
        assert_eq!(report.overlaps[0].total, 3.0);
        assert_eq!(report.audit.missing.get(CLICKS), Some(&1));

        let config = AnalysisConfig {
            fallback: FallbackPolicy::Exclude,
            ..Default::default()
        };
        let report = keyword_cannibalization(&ads, &seo, &config);
        assert!(report.overlaps.is_empty());
        assert_eq!(report.audit.excluded_rows, 1);
    }

    #[test]
    fn test_ctr_comparison_sorted_and_limited() {
        let ads: Vec<CsvRow> = (0..20)
            .map(|i| ads_row(i, &format!("kw {}", i), "1", &format!("{},5 %", i)))
            .collect();
        let seo: Vec<CsvRow> = (0..20)
            .map(|i| seo_row(i, &format!("KW {}", i), "1", "1.25%"))
            .collect();

        let report = ctr_comparison(&ads, &seo, &AnalysisConfig::default());

        assert_eq!(report.rows.len(), 15);
        assert_eq!(report.rows[0].keyword, "kw 19");
        assert_eq!(report.rows[0].ads_ctr, 19.5);
        assert_eq!(report.rows[0].seo_ctr, 1.25);
        assert!(report
            .rows
            .windows(2)
            .all(|w| w[0].ads_ctr >= w[1].ads_ctr));
    }

    #[test]
    fn test_ctr_comparison_reads_both_rate_formats() {
        let ads = vec![
            ads_row(0, "fer forgé", "120", "5,10 %"),
            ads_row(1, "rampe", "8", "1,5 %"),
        ];
        let seo = vec![
            seo_row(0, "Fer Forgé", "340", "4.17%"),
            seo_row(1, "rampe", "3", "12.5%"),
        ];

        let report = ctr_comparison(&ads, &seo, &AnalysisConfig::default());

        assert_eq!(report.rows[0].keyword, "fer forgé");
        assert_eq!(report.rows[0].ads_ctr, 5.1);
        assert_eq!(report.rows[0].seo_ctr, 4.17);
        assert_eq!(report.rows[1].seo_ctr, 12.5);
        assert!(report.audit.is_clean());
    }
}
