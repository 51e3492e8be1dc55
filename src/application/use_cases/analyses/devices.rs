//! Ads devices against Search Console devices

use super::columns::{ADS_DEVICE, CLICKS, COST, CTR, IMPRESSIONS, POSITION, SEO_DEVICE};
use super::descending;
use crate::domain::analysis::{AdsDeviceRow, DeviceClicks, DeviceComparison, SeoDeviceRow};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{parse_currency, CsvRow, NormalizedKey};
use crate::domain::fallback::FallbackAudit;

/// Chart slots, in display order before sorting
const CHART_DEVICES: [&str; 4] = ["Mobile", "Desktop", "Tablet", "TV"];

/// Map the French device labels of both exports onto one vocabulary.
/// Unknown labels pass through trimmed.
pub fn canonical_device(raw: &str) -> String {
    match NormalizedKey::new(raw).as_str() {
        "ordinateurs" | "ordinateur" => "Desktop".to_string(),
        "mobiles" | "mobile" => "Mobile".to_string(),
        "tablettes" | "tablette" => "Tablet".to_string(),
        "ecrans tv" | "ecran tv" => "TV".to_string(),
        _ => raw.trim().to_string(),
    }
}

pub fn device_comparison(
    ads: &[CsvRow],
    seo: &[CsvRow],
    config: &AnalysisConfig,
) -> DeviceComparison {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut ads_rows: Vec<AdsDeviceRow> = ads
        .iter()
        .filter_map(|row| {
            let device = canonical_device(row.get_non_empty(ADS_DEVICE)?);
            let mut reader = audit.reader(row);
            let clicks = reader.number(CLICKS);
            let cost = reader.with(COST, parse_currency);
            let impressions = reader.number(IMPRESSIONS);
            reader.finish(AdsDeviceRow {
                device,
                clicks,
                cost,
                impressions,
            })
        })
        .collect();

    let mut seo_rows: Vec<SeoDeviceRow> = seo
        .iter()
        .filter_map(|row| {
            let device = canonical_device(row.get_non_empty(SEO_DEVICE)?);
            let mut reader = audit.reader(row);
            let clicks = reader.number(CLICKS);
            let impressions = reader.number(IMPRESSIONS);
            let ctr = reader.text(CTR).map(str::to_string);
            let position = reader.text(POSITION).map(str::to_string);
            reader.finish(SeoDeviceRow {
                device,
                clicks,
                impressions,
                ctr,
                position,
            })
        })
        .collect();

    ads_rows.sort_by(|a, b| descending(a.clicks, b.clicks));
    seo_rows.sort_by(|a, b| descending(a.clicks, b.clicks));

    let mut chart: Vec<DeviceClicks> = CHART_DEVICES
        .iter()
        .map(|device| DeviceClicks {
            device: device.to_string(),
            ads: ads_rows
                .iter()
                .find(|r| r.device == *device)
                .map_or(0.0, |r| r.clicks),
            seo: seo_rows
                .iter()
                .find(|r| r.device == *device)
                .map_or(0.0, |r| r.clicks),
        })
        .collect();
    chart.sort_by(|a, b| descending(a.ads + a.seo, b.ads + b.seo));

    DeviceComparison {
        ads: ads_rows,
        seo: seo_rows,
        chart,
        audit,
    }
}
