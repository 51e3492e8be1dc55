//! Analysis datasets handed to the presentation client.
//! Every report carries the [`FallbackAudit`] of the metrics it aggregated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::ViewKind;
use super::csv::CsvRow;
use super::fallback::FallbackAudit;

// ---------- Ads vs SEO keyword joins ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordOverlap {
    /// Ads-side label, original casing and accents
    pub keyword: String,
    pub ads_clicks: f64,
    pub seo_clicks: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCannibalization {
    /// Sorted by total clicks, descending
    pub overlaps: Vec<KeywordOverlap>,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtrComparisonRow {
    pub keyword: String,
    pub ads_ctr: f64,
    pub seo_ctr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtrComparison {
    /// Sorted by Ads CTR, descending
    pub rows: Vec<CtrComparisonRow>,
    pub audit: FallbackAudit,
}

// ---------- Devices ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsDeviceRow {
    pub device: String,
    pub clicks: f64,
    pub cost: f64,
    pub impressions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoDeviceRow {
    pub device: String,
    pub clicks: f64,
    pub impressions: f64,
    /// Raw CTR cell, as exported
    pub ctr: Option<String>,
    /// Raw position cell, as exported
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClicks {
    pub device: String,
    pub ads: f64,
    pub seo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComparison {
    pub ads: Vec<AdsDeviceRow>,
    pub seo: Vec<SeoDeviceRow>,
    /// One entry per canonical device, sorted by ads + seo clicks
    pub chart: Vec<DeviceClicks>,
    pub audit: FallbackAudit,
}

// ---------- Analytics pages vs SEO pages ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCorrelationRow {
    pub path: String,
    pub views: f64,
    pub position: f64,
    pub impressions: f64,
    pub clicks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCorrelation {
    pub pages: Vec<PageCorrelationRow>,
    pub audit: FallbackAudit,
}

// ---------- Weekly ads spend vs orders ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAdsOrders {
    /// Week label without the "Semaine du " prefix
    pub label: String,
    pub week_start: NaiveDate,
    pub cost: f64,
    pub orders: usize,
    /// Cost per order, 0 when the week has no orders
    pub cpa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsOrders {
    pub weeks: Vec<WeeklyAdsOrders>,
    /// Order rows whose date could not be read
    pub unreadable_orders: usize,
    pub audit: FallbackAudit,
}

// ---------- Single-file ads views ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyPit {
    pub keyword: String,
    pub cost: f64,
    pub clicks: f64,
    pub ctr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyPits {
    pub keywords: Vec<MoneyPit>,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    pub campaign: String,
    pub cost: f64,
    pub clicks: f64,
    pub cpc: f64,
    pub conversions: f64,
    pub raw_cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRanking {
    /// Sorted by cost, descending
    pub by_cost: Vec<CampaignPerformance>,
    /// Sorted by conversions then clicks, descending
    pub ranking: Vec<CampaignPerformance>,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProfitability {
    pub campaign: String,
    pub cost: f64,
    pub conversions: f64,
    pub clicks: f64,
    pub cpa: f64,
    pub profitable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsProfitability {
    pub campaigns: Vec<CampaignProfitability>,
    pub average_cpa: f64,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCpo {
    pub campaign: String,
    pub cost: f64,
    pub conversions: f64,
    pub cpo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSlice {
    pub name: String,
    pub amount: f64,
    pub share: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    /// Sorted by cost per order, ascending
    pub campaigns: Vec<CampaignCpo>,
    pub extra_budget: f64,
    pub allocation: Vec<BudgetSlice>,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapDay {
    pub day: String,
    /// Clicks for hours 0..24
    pub hours: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeHeatmap {
    pub days: Vec<HeatmapDay>,
    pub max: f64,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBracket {
    pub age: String,
    pub impressions_by_sex: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub brackets: Vec<AgeBracket>,
    pub audit: FallbackAudit,
}

// ---------- Single-file SEO views ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoCtrPoint {
    pub query: String,
    pub impressions: f64,
    pub clicks: f64,
    pub ctr: f64,
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoCtrStats {
    pub average_ctr: f64,
    pub median_impressions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoCtr {
    pub points: Vec<SeoCtrPoint>,
    /// Absent when no query passes the impression threshold
    pub stats: Option<SeoCtrStats>,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickWin {
    pub keyword: String,
    pub position: i64,
    pub volume: f64,
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoQuickWins {
    pub keywords: Vec<QuickWin>,
    pub audit: FallbackAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryTraffic {
    pub country: String,
    pub clicks: f64,
    pub ctr: f64,
    pub position: f64,
    pub raw_ctr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoCountry {
    pub countries: Vec<CountryTraffic>,
    pub total_clicks: f64,
    pub home_clicks: f64,
    /// Home country share of total clicks, in percent
    pub home_share: f64,
    pub audit: FallbackAudit,
}

// ---------- Plain tables ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label_column: String,
    pub value_column: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub rows: Vec<CsvRow>,
    pub chart: Option<ChartSeries>,
    pub audit: FallbackAudit,
}

/// Result of running one catalog entry's view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AnalysisReport {
    Table(TableView),
    CampaignRanking(CampaignRanking),
    DeviceComparison(DeviceComparison),
    TimeHeatmap(TimeHeatmap),
    Demographics(Demographics),
    KeywordCannibalization(KeywordCannibalization),
    CtrComparison(CtrComparison),
    PageCorrelation(PageCorrelation),
    AdsOrders(AdsOrders),
    MoneyPits(MoneyPits),
    SeoCtr(SeoCtr),
    SeoQuickWins(SeoQuickWins),
    AdsProfitability(AdsProfitability),
    SeoCountry(SeoCountry),
    BudgetAllocation(BudgetAllocation),
}

impl AnalysisReport {
    pub fn view(&self) -> ViewKind {
        match self {
            Self::Table(_) => ViewKind::Table,
            Self::CampaignRanking(_) => ViewKind::CampaignRanking,
            Self::DeviceComparison(_) => ViewKind::DeviceComparison,
            Self::TimeHeatmap(_) => ViewKind::TimeHeatmap,
            Self::Demographics(_) => ViewKind::Demographics,
            Self::KeywordCannibalization(_) => ViewKind::KeywordCannibalization,
            Self::CtrComparison(_) => ViewKind::CtrComparison,
            Self::PageCorrelation(_) => ViewKind::PageCorrelation,
            Self::AdsOrders(_) => ViewKind::AdsOrders,
            Self::MoneyPits(_) => ViewKind::MoneyPits,
            Self::SeoCtr(_) => ViewKind::SeoCtr,
            Self::SeoQuickWins(_) => ViewKind::SeoQuickWins,
            Self::AdsProfitability(_) => ViewKind::AdsProfitability,
            Self::SeoCountry(_) => ViewKind::SeoCountry,
            Self::BudgetAllocation(_) => ViewKind::BudgetAllocation,
        }
    }

    pub fn audit(&self) -> &FallbackAudit {
        match self {
            Self::Table(r) => &r.audit,
            Self::CampaignRanking(r) => &r.audit,
            Self::DeviceComparison(r) => &r.audit,
            Self::TimeHeatmap(r) => &r.audit,
            Self::Demographics(r) => &r.audit,
            Self::KeywordCannibalization(r) => &r.audit,
            Self::CtrComparison(r) => &r.audit,
            Self::PageCorrelation(r) => &r.audit,
            Self::AdsOrders(r) => &r.audit,
            Self::MoneyPits(r) => &r.audit,
            Self::SeoCtr(r) => &r.audit,
            Self::SeoQuickWins(r) => &r.audit,
            Self::AdsProfitability(r) => &r.audit,
            Self::SeoCountry(r) => &r.audit,
            Self::BudgetAllocation(r) => &r.audit,
        }
    }
}

/// Round to cents, as displayed in the dashboard
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
