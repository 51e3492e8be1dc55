//! Limits and thresholds of the per-view analyses

use serde::{Deserialize, Serialize};

use super::fallback::FallbackPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Missing-metric policy applied by every analysis
    pub fallback: FallbackPolicy,

    /// Campaign ranking only reads this many leading rows
    pub campaign_row_limit: usize,

    /// Keywords kept by the CTR comparison
    pub ctr_top_n: usize,

    /// Pages need strictly more views than this to be correlated
    pub page_min_views: f64,
    pub page_top_n: usize,
    /// Utility paths left out of the page correlation
    pub excluded_paths: Vec<String>,

    pub money_pit_top_n: usize,

    /// Queries need strictly more impressions than this
    pub seo_ctr_min_impressions: f64,
    pub seo_ctr_top_n: usize,

    /// Inclusive position window of a quick win
    pub quick_win_min_position: i64,
    pub quick_win_max_position: i64,
    /// Position assumed when the rank tracker has none
    pub quick_win_default_position: i64,

    pub country_top_n: usize,
    /// Country whose traffic share is reported
    pub home_country: String,

    /// Additional budget split by the allocation recommendation (EUR)
    pub extra_budget: f64,

    /// Quick chart size for plain tables
    pub chart_rows: usize,
    pub chart_label_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::Zero,
            campaign_row_limit: 100,
            ctr_top_n: 15,
            page_min_views: 5.0,
            page_top_n: 50,
            excluded_paths: [
                "/recherche",
                "/panier",
                "/commande",
                "/connexion",
                "/mon-compte",
                "/inscription",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            money_pit_top_n: 10,
            seo_ctr_min_impressions: 50.0,
            seo_ctr_top_n: 100,
            quick_win_min_position: 5,
            quick_win_max_position: 15,
            quick_win_default_position: 100,
            country_top_n: 15,
            home_country: "France".to_string(),
            extra_budget: 2000.0,
            chart_rows: 30,
            chart_label_chars: 30,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.quick_win_min_position > self.quick_win_max_position {
            return Err("quick_win_min_position must be <= quick_win_max_position".to_string());
        }
        if !self.extra_budget.is_finite() || self.extra_budget < 0.0 {
            return Err("extra_budget must be a non-negative amount".to_string());
        }
        if !self.page_min_views.is_finite() || !self.seo_ctr_min_impressions.is_finite() {
            return Err("thresholds must be finite".to_string());
        }
        if self.chart_label_chars == 0 {
            return Err("chart_label_chars must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_window() {
        let config = AnalysisConfig {
            quick_win_min_position: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
