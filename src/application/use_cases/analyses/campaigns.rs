//! Google Ads campaign and keyword spend

use super::columns::{ADS_KEYWORD, CAMPAIGN, CLICKS, CONVERSIONS, COST, CTR};
use super::descending;
use crate::domain::analysis::{
    round_cents, AdsProfitability, BudgetAllocation, BudgetSlice, CampaignCpo,
    CampaignPerformance, CampaignProfitability, CampaignRanking, MoneyPit, MoneyPits,
};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::csv::{parse_currency, CsvRow};
use crate::domain::fallback::FallbackAudit;

const UNKNOWN_KEYWORD: &str = "Inconnu";

/// Recommended split of the extra budget: (name, share, rationale)
const BUDGET_SPLIT: [(&str, f64, &str); 3] = [
    (
        "Scaling Pmax (ROI Leader)",
        0.60,
        "Coût par commande le plus bas du compte : la campagne absorbe du budget sans dégrader la rentabilité.",
    ),
    (
        "Capture SEO Quick Wins",
        0.25,
        "Mots clés en positions 5 à 15 : une poussée payante le temps que le référencement naturel atteigne le top 3.",
    ),
    (
        "Brand Protection & Tests",
        0.15,
        "Défense de la marque face aux concurrents et budget d'essai pour de nouvelles annonces.",
    ),
];

fn campaign_name(row: &CsvRow) -> String {
    row.get(CAMPAIGN).unwrap_or_default().trim().to_string()
}

/// Cost-sorted and conversion-ranked views of the leading campaign rows
pub fn campaign_ranking(rows: &[CsvRow], config: &AnalysisConfig) -> CampaignRanking {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut by_cost: Vec<CampaignPerformance> = rows
        .iter()
        .take(config.campaign_row_limit)
        .filter_map(|row| {
            let campaign = row.get_non_empty(CAMPAIGN)?.trim().to_string();
            let mut reader = audit.reader(row);
            let cost = reader.with(COST, parse_currency);
            let clicks = reader.number(CLICKS);
            let conversions = reader.number(CONVERSIONS);
            let raw_cost = reader.text(COST).map(str::to_string);
            reader.finish(CampaignPerformance {
                campaign,
                cost,
                clicks,
                cpc: if clicks > 0.0 { round_cents(cost / clicks) } else { 0.0 },
                conversions,
                raw_cost,
            })
        })
        .collect();

    let mut ranking = by_cost.clone();
    ranking.sort_by(|a, b| {
        descending(a.conversions, b.conversions).then(descending(a.clicks, b.clicks))
    });
    by_cost.sort_by(|a, b| descending(a.cost, b.cost));

    CampaignRanking {
        by_cost,
        ranking,
        audit,
    }
}

/// Keywords that spend the most
pub fn money_pits(rows: &[CsvRow], config: &AnalysisConfig) -> MoneyPits {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut keywords: Vec<MoneyPit> = rows
        .iter()
        .filter_map(|row| {
            let keyword = row
                .get_non_empty(ADS_KEYWORD)
                .map_or(UNKNOWN_KEYWORD, str::trim)
                .to_string();
            let mut reader = audit.reader(row);
            let cost = reader.with(COST, parse_currency);
            let clicks = reader.number(CLICKS);
            let ctr = reader.text(CTR).unwrap_or("0%").to_string();
            reader.finish(MoneyPit {
                keyword,
                cost,
                clicks,
                ctr,
            })
        })
        .filter(|k| k.cost > 0.0)
        .collect();

    keywords.sort_by(|a, b| descending(a.cost, b.cost));
    keywords.truncate(config.money_pit_top_n);

    MoneyPits { keywords, audit }
}

/// CPA per campaign, flagged against the account-wide average
pub fn ads_profitability(rows: &[CsvRow], config: &AnalysisConfig) -> AdsProfitability {
    let mut audit = FallbackAudit::new(config.fallback);

    let read: Vec<CampaignProfitability> = rows
        .iter()
        .filter_map(|row| {
            let mut reader = audit.reader(row);
            let cost = reader.number(COST);
            let conversions = reader.number(CONVERSIONS);
            let clicks = reader.number(CLICKS);
            let cpa = if conversions > 0.0 {
                cost / conversions
            } else {
                cost
            };
            reader.finish(CampaignProfitability {
                campaign: campaign_name(row),
                cost,
                conversions,
                clicks,
                cpa: round_cents(cpa),
                profitable: false,
            })
        })
        .collect();

    let total_cost: f64 = read.iter().map(|c| c.cost).sum();
    let total_conversions: f64 = read.iter().map(|c| c.conversions).sum();
    let average_cpa = if total_conversions > 0.0 {
        total_cost / total_conversions
    } else {
        0.0
    };

    let campaigns = read
        .into_iter()
        .filter(|c| c.cost > 0.0)
        .map(|c| CampaignProfitability {
            profitable: c.cpa <= average_cpa,
            ..c
        })
        .collect();

    AdsProfitability {
        campaigns,
        average_cpa,
        audit,
    }
}

/// Cost per order of each spending campaign and a split of the extra budget
pub fn budget_allocation(rows: &[CsvRow], config: &AnalysisConfig) -> BudgetAllocation {
    let mut audit = FallbackAudit::new(config.fallback);

    let mut campaigns: Vec<CampaignCpo> = rows
        .iter()
        .filter_map(|row| {
            let mut reader = audit.reader(row);
            let cost = reader.number(COST);
            let conversions = reader.number(CONVERSIONS);
            let cpo = if conversions > 0.0 {
                round_cents(cost / conversions)
            } else {
                0.0
            };
            reader.finish(CampaignCpo {
                campaign: campaign_name(row),
                cost,
                conversions,
                cpo,
            })
        })
        .filter(|c| c.cost > 0.0)
        .collect();

    campaigns.sort_by(|a, b| a.cpo.total_cmp(&b.cpo));

    let allocation = BUDGET_SPLIT
        .iter()
        .map(|(name, share, rationale)| BudgetSlice {
            name: name.to_string(),
            amount: round_cents(config.extra_budget * share),
            share: *share,
            rationale: rationale.to_string(),
        })
        .collect();

    BudgetAllocation {
        campaigns,
        extra_budget: config.extra_budget,
        allocation,
        audit,
    }
}
