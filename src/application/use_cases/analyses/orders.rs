//! Weekly Ads spend against web orders

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::columns::{COST, ORDER_DATE, WEEK};
use crate::domain::analysis::{AdsOrders, WeeklyAdsOrders};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{parse_currency, CsvRow, NormalizedKey};
use crate::domain::fallback::FallbackAudit;

/// "Semaine du 28 juil. 2025", "28 juillet 2025"
static WEEK_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:semaine\s+du\s+)?(\d{1,2})\s+([^\s\d]+)\s+(\d{4})\s*$").unwrap()
});

const WEEK_LABEL_PREFIX: &str = "Semaine du ";

fn french_month(token: &str) -> Option<u32> {
    let key = NormalizedKey::new(token.trim_end_matches('.'));
    let month = match key.as_str() {
        "janv" | "janvier" => 1,
        "fevr" | "fev" | "fevrier" => 2,
        "mars" => 3,
        "avr" | "avril" => 4,
        "mai" => 5,
        "juin" => 6,
        "juil" | "juillet" => 7,
        "aout" => 8,
        "sept" | "septembre" => 9,
        "oct" | "octobre" => 10,
        "nov" | "novembre" => 11,
        "dec" | "decembre" => 12,
        _ => return None,
    };
    Some(month)
}

/// First day of the week a label like "Semaine du 28 juil. 2025" names
pub fn parse_week_label(label: &str) -> Option<NaiveDate> {
    let caps = WEEK_LABEL.captures(label)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = french_month(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Order timestamp from the SQL export: ISO date, datetime or RFC 3339
pub fn parse_order_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Cost per acquisition of each Ads week, counting orders placed in
/// `[week start, week start + 7 days)`
pub fn ads_orders(ads: &[CsvRow], orders: &[CsvRow], config: &AnalysisConfig) -> AdsOrders {
    let mut audit = FallbackAudit::new(config.fallback);

    let timestamps: Vec<NaiveDateTime> = orders
        .iter()
        .filter_map(|row| row.get(ORDER_DATE).and_then(parse_order_timestamp))
        .collect();
    let unreadable_orders = orders.len() - timestamps.len();

    let weeks: Vec<WeeklyAdsOrders> = ads
        .iter()
        .filter_map(|row| {
            let label = row.get_non_empty(WEEK)?.trim();
            let Some(week_start) = parse_week_label(label) else {
                debug!(label, "Skipping unreadable week label");
                return None;
            };
            let start = week_start.and_hms_opt(0, 0, 0)?;
            let end = start + Duration::days(7);

            let mut reader = audit.reader(row);
            let cost = reader.with(COST, parse_currency);
            let count = timestamps
                .iter()
                .filter(|ts| **ts >= start && **ts < end)
                .count();

            reader.finish(WeeklyAdsOrders {
                label: label
                    .strip_prefix(WEEK_LABEL_PREFIX)
                    .unwrap_or(label)
                    .to_string(),
                week_start,
                cost,
                orders: count,
                cpa: if count > 0 { cost / count as f64 } else { 0.0 },
            })
        })
        .collect();

    AdsOrders {
        weeks,
        unreadable_orders,
        audit,
    }
}
