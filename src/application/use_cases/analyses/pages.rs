//! GA4 page views against Search Console page performance

use url::Url;

use super::columns::{CLICKS, GA_PAGE_PATH, IMPRESSIONS, POSITION, SEO_PAGE, VIEWS};
use super::descending;
use crate::application::use_cases::cross_source_join::join_by;
use crate::domain::analysis::{PageCorrelation, PageCorrelationRow};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{parse_decimal_prefix, CsvRow};
use crate::domain::fallback::FallbackAudit;

/// Path part of a Search Console page URL, without the query string.
/// The path is kept as written (no percent-encoding) so it compares equal
/// to GA4 paths. Relative inputs are taken as paths already.
pub fn page_path(raw: &str) -> String {
    let raw = raw.trim();
    let without_origin = match Url::parse(raw) {
        Ok(url) if url.has_host() => raw
            .find("://")
            .map(|i| &raw[i + 3..])
            .and_then(|rest| rest.find('/').map(|j| &rest[j..]))
            .unwrap_or(""),
        _ => raw,
    };

    let path = without_origin.split('?').next().unwrap_or("");
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn analytics_path<'r>(row: &'r CsvRow, config: &AnalysisConfig) -> Option<&'r str> {
    let path = row.get_non_empty(GA_PAGE_PATH)?.trim();
    if path.contains('?') || config.excluded_paths.iter().any(|p| p == path) {
        return None;
    }
    Some(path)
}

/// Pages with real traffic, and how they rank organically
pub fn page_correlation(
    analytics: &[CsvRow],
    seo: &[CsvRow],
    config: &AnalysisConfig,
) -> PageCorrelation {
    let mut audit = FallbackAudit::new(config.fallback);

    let pairs = join_by(
        analytics,
        seo,
        |row| analytics_path(row, config).map(str::to_string),
        |row| row.get_non_empty(SEO_PAGE).map(page_path),
    );

    let mut pages: Vec<PageCorrelationRow> = pairs
        .into_iter()
        .filter_map(|pair| {
            let mut reader = audit.reader(pair.left);
            let views = reader.number(VIEWS);
            let views = reader.finish(views)?;

            let mut reader = audit.reader(pair.right);
            let clicks = reader.number(CLICKS);
            let impressions = reader.number(IMPRESSIONS);
            let position = reader.with(POSITION, |v| v.and_then(parse_decimal_prefix));
            reader.finish(PageCorrelationRow {
                path: pair.key,
                views,
                position,
                impressions,
                clicks,
            })
        })
        .filter(|page| page.views > config.page_min_views)
        .collect();

    pages.sort_by(|a, b| descending(a.views, b.views));
    pages.truncate(config.page_top_n);

    PageCorrelation { pages, audit }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ga(i: usize, path: &str, views: &str) -> CsvRow {
        CsvRow::from_pairs(i, [(GA_PAGE_PATH, path), (VIEWS, views)])
    }

    fn sc(i: usize, url: &str, clicks: &str, position: &str) -> CsvRow {
        CsvRow::from_pairs(
            i,
            [(SEO_PAGE, url), (CLICKS, clicks), (IMPRESSIONS, "1 000"), (POSITION, position)],
        )
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("https://www.example.fr/portails/alu?utm=x"), "/portails/alu");
        assert_eq!(page_path("https://www.example.fr"), "/");
        assert_eq!(page_path("https://www.example.fr/"), "/");
        assert_eq!(page_path("https://www.example.fr/clôture"), "/clôture");
        assert_eq!(page_path("/contact"), "/contact");
    }

    #[test]
    fn test_page_correlation() {
        let analytics = vec![
            ga(0, "/", "1 500"),
            ga(1, "/panier", "900"),
            ga(2, "/portails?page=2", "300"),
            ga(3, "/portails", "420"),
            ga(4, "/mentions-legales", "3"),
            ga(5, "/sans-seo", "100"),
        ];
        let seo = vec![
            sc(0, "https://www.example.fr/", "80", "3.4"),
            sc(1, "https://www.example.fr/panier", "5", "12"),
            sc(2, "https://www.example.fr/portails", "45", "7.25"),
            sc(3, "https://www.example.fr/mentions-legales", "1", "40"),
        ];

        let report = page_correlation(&analytics, &seo, &AnalysisConfig::default());

        let paths: Vec<&str> = report.pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/portails"]);
        assert_eq!(report.pages[0].views, 1500.0);
        assert_eq!(report.pages[0].position, 3.4);
        assert_eq!(report.pages[1].position, 7.25);
        assert_eq!(report.pages[1].impressions, 1000.0);
    }
}
