// ============================================================
// VIEW ANALYSES
// ============================================================
// One pure function per catalog view: rows in, report out.
// Metric cells are read through `MetricReader` so every fallback is audited.

pub mod audience;
pub mod campaigns;
pub mod devices;
pub mod keywords;
pub mod orders;
pub mod pages;
pub mod search;
pub mod table;

pub use audience::{demographics, time_heatmap};
pub use campaigns::{ads_profitability, budget_allocation, campaign_ranking, money_pits};
pub use devices::device_comparison;
pub use keywords::{ctr_comparison, keyword_cannibalization};
pub use orders::ads_orders;
pub use pages::page_correlation;
pub use search::{seo_country, seo_ctr, seo_quick_wins};
pub use table::table_view;

use std::cmp::Ordering;

/// Export header names
pub(crate) mod columns {
    pub const CAMPAIGN: &str = "Nom de la campagne";
    pub const COST: &str = "Coût";
    pub const CLICKS: &str = "Clics";
    pub const IMPRESSIONS: &str = "Impressions";
    pub const CONVERSIONS: &str = "Conversions";
    pub const CTR: &str = "CTR";
    pub const POSITION: &str = "Position";

    pub const ADS_KEYWORD: &str = "Mot clé pour le Réseau de Recherche";
    pub const ADS_DEVICE: &str = "Type d'appareil";
    pub const WEEK: &str = "Semaine";
    pub const DAY: &str = "Jour";
    pub const START_HOUR: &str = "Heure de début";
    pub const AGE_BRACKET: &str = "Tranche d'âge";
    pub const SEX: &str = "Sexe";

    pub const SEO_QUERY: &str = "Requêtes les plus fréquentes";
    pub const SEO_PAGE: &str = "Pages les plus populaires";
    pub const SEO_DEVICE: &str = "Appareil";
    pub const COUNTRY: &str = "Pays";

    pub const GA_PAGE_PATH: &str = "Chemin de la page et classe de l'écran";
    pub const VIEWS: &str = "Vues";

    pub const ORDER_DATE: &str = "date_commande";

    pub const RT_KEYWORD: &str = "Mot clé";
    pub const RT_VOLUME: &str = "# de recherches";
    pub const RT_POSITION: &str = "Pos. Google.fr";
    pub const RT_VISIBILITY: &str = "Visibilité";
}

/// Descending order on floats for stable `sort_by`
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
