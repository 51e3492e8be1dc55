//! Search Console and rank tracker views

use super::columns::{
    CLICKS, COUNTRY, CTR, IMPRESSIONS, POSITION, RT_KEYWORD, RT_POSITION, RT_VISIBILITY, RT_VOLUME,
    SEO_QUERY,
};
use super::descending;
use crate::domain::analysis::{
    CountryTraffic, QuickWin, SeoCountry, SeoCtr, SeoCtrPoint, SeoCtrStats, SeoQuickWins,
};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{
    parse_decimal_prefix, parse_integer_prefix, parse_percentage, CsvRow, ParsedValue,
};
use crate::domain::fallback::FallbackAudit;

/// Rank tracker marker for keywords without search volume data
const NO_DATA: &str = "N/D";

fn decimal_position(value: Option<&str>) -> ParsedValue {
    value.and_then(parse_decimal_prefix)
}

/// Search volume: `N/D` reads as 0, spaces are thousands separators
fn search_volume(value: Option<&str>) -> ParsedValue {
    let raw = value?.trim();
    if raw == NO_DATA {
        return Some(0.0);
    }
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    parse_integer_prefix(&compact).map(|v| v as f64)
}

/// Query scatter data: impressions vs CTR of the busiest queries
pub fn seo_ctr(rows: &[CsvRow], config: &AnalysisConfig) -> SeoCtr {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut points: Vec<SeoCtrPoint> = rows
        .iter()
        .filter_map(|row| {
            let query = row
                .get_non_empty(SEO_QUERY)
                .map_or("Inconnu", str::trim)
                .to_string();
            let mut reader = audit.reader(row);
            let impressions = reader.number(IMPRESSIONS);
            let clicks = reader.number(CLICKS);
            let ctr = reader.with(CTR, parse_percentage);
            let position = reader.with(POSITION, decimal_position);
            reader.finish(SeoCtrPoint {
                query,
                impressions,
                clicks,
                ctr,
                position,
            })
        })
        .filter(|p| p.impressions > config.seo_ctr_min_impressions)
        .collect();

    points.sort_by(|a, b| descending(a.impressions, b.impressions));
    points.truncate(config.seo_ctr_top_n);

    let stats = ctr_stats(&points);
    SeoCtr {
        points,
        stats,
        audit,
    }
}

/// Mean CTR and upper median of impressions; `None` without points
fn ctr_stats(points: &[SeoCtrPoint]) -> Option<SeoCtrStats> {
    if points.is_empty() {
        return None;
    }

    let average_ctr = points.iter().map(|p| p.ctr).sum::<f64>() / points.len() as f64;

    let mut impressions: Vec<f64> = points.iter().map(|p| p.impressions).collect();
    impressions.sort_by(f64::total_cmp);

    Some(SeoCtrStats {
        average_ctr,
        median_impressions: impressions[impressions.len() / 2],
    })
}

/// Keywords ranking just below the top results, by search volume
pub fn seo_quick_wins(rows: &[CsvRow], config: &AnalysisConfig) -> SeoQuickWins {
    let mut audit = FallbackAudit::new(config.fallback);
    let window = config.quick_win_min_position..=config.quick_win_max_position;

    let mut keywords: Vec<QuickWin> = rows
        .iter()
        .filter_map(|row| {
            // unranked keywords carry no position and fall outside the window
            let position = row
                .get(RT_POSITION)
                .and_then(parse_integer_prefix)
                .unwrap_or(config.quick_win_default_position);
            if !window.contains(&position) {
                return None;
            }

            let mut reader = audit.reader(row);
            let volume = reader.with(RT_VOLUME, search_volume);
            let visibility = reader.number(RT_VISIBILITY);
            reader.finish(QuickWin {
                keyword: row.get(RT_KEYWORD).unwrap_or_default().trim().to_string(),
                position,
                volume,
                visibility,
            })
        })
        .collect();

    keywords.sort_by(|a, b| descending(a.volume, b.volume));

    SeoQuickWins { keywords, audit }
}

/// Organic clicks per country and the home market's share
pub fn seo_country(rows: &[CsvRow], config: &AnalysisConfig) -> SeoCountry {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut countries: Vec<CountryTraffic> = rows
        .iter()
        .filter_map(|row| {
            let country = row.get(COUNTRY).unwrap_or_default().trim().to_string();
            let mut reader = audit.reader(row);
            let clicks = reader.number(CLICKS);
            let ctr = reader.with(CTR, parse_percentage);
            let position = reader.with(POSITION, decimal_position);
            let raw_ctr = reader.text(CTR).unwrap_or("0%").to_string();
            reader.finish(CountryTraffic {
                country,
                clicks,
                ctr,
                position,
                raw_ctr,
            })
        })
        .collect();

    let total_clicks: f64 = countries.iter().map(|c| c.clicks).sum();
    let home_clicks = countries
        .iter()
        .rev()
        .find(|c| c.country == config.home_country)
        .map_or(0.0, |c| c.clicks);
    let home_share = if total_clicks > 0.0 {
        home_clicks * 100.0 / total_clicks
    } else {
        0.0
    };

    countries.sort_by(|a, b| descending(a.clicks, b.clicks));
    countries.truncate(config.country_top_n);

    SeoCountry {
        countries,
        total_clicks,
        home_clicks,
        home_share,
        audit,
    }
}
