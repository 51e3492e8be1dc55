//! Static file catalog: which export backs which view, and which companion
//! export a joined view also needs.

use serde::{Deserialize, Serialize};
use std::fmt;

const ADS_CAMPAIGNS: &str = "/data/ads/Campagnes(2025.08.03-2026.01.29).csv";
const ADS_KEYWORDS: &str = "/data/ads/Mots_cles_pour_le_Reseau_de_Recherche(2025.08.03-2026.01.29).csv";
const ADS_DEVICES: &str = "/data/ads/Appareils(2025.08.03-2026.01.29).csv";
const ADS_DAY_HOUR: &str = "/data/ads/Jour_et_heure(Jour_Heure_2025.08.03-2026.01.29).csv";
const ADS_SEX_AGE: &str = "/data/ads/Donnees_demographiques(Sexe_Age_2025.08.03-2026.01.29).csv";
const ADS_WEEKLY: &str = "/data/ads/Serie_temporelle(2025.07.28-2026.01.29).csv";
const GA_PAGES: &str = "/data/analytics/Pages_et_ecrans_Chemin_de_la_page_et_classe_de_lecran (1).csv";
const SEO_QUERIES: &str = "/data/seo/Requetes.csv";
const SEO_PAGES: &str = "/data/seo/Pages.csv";
const SEO_DEVICES: &str = "/data/seo/Appareils.csv";
const SEO_COUNTRIES: &str = "/data/seo/Pays.csv";
const SEO_RANKTRACKER: &str = "/data/seo/ranktracker.csv";
const WEB_ORDERS: &str = "/data/web/request_sql_2.csv";

/// Which analysis renders a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Table,
    CampaignRanking,
    DeviceComparison,
    TimeHeatmap,
    Demographics,
    KeywordCannibalization,
    CtrComparison,
    PageCorrelation,
    AdsOrders,
    MoneyPits,
    SeoCtr,
    SeoQuickWins,
    AdsProfitability,
    SeoCountry,
    BudgetAllocation,
}

impl ViewKind {
    /// Whether the view joins its primary file with a companion export
    pub fn is_joined(&self) -> bool {
        matches!(
            self,
            Self::DeviceComparison
                | Self::KeywordCannibalization
                | Self::CtrComparison
                | Self::PageCorrelation
                | Self::AdsOrders
        )
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::CampaignRanking => "campaign_ranking",
            Self::DeviceComparison => "device_comparison",
            Self::TimeHeatmap => "time_heatmap",
            Self::Demographics => "demographics",
            Self::KeywordCannibalization => "keyword_cannibalization",
            Self::CtrComparison => "ctr_comparison",
            Self::PageCorrelation => "page_correlation",
            Self::AdsOrders => "ads_orders",
            Self::MoneyPits => "money_pits",
            Self::SeoCtr => "seo_ctr",
            Self::SeoQuickWins => "seo_quick_wins",
            Self::AdsProfitability => "ads_profitability",
            Self::SeoCountry => "seo_country",
            Self::BudgetAllocation => "budget_allocation",
        };
        f.write_str(name)
    }
}

/// One selectable export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub path: String,
    pub label: String,
    pub description: String,
    pub view: ViewKind,
    /// Second export a joined view loads alongside `path`
    pub companion: Option<String>,
}

impl CatalogEntry {
    fn new(id: &str, path: &str, label: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            path: path.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            view: ViewKind::Table,
            companion: None,
        }
    }

    fn view(mut self, view: ViewKind) -> Self {
        self.view = view;
        self
    }

    fn companion(mut self, path: &str) -> Self {
        self.companion = Some(path.to_string());
        self
    }

    /// Every resource the entry's view needs, primary first
    pub fn resources(&self) -> Vec<&str> {
        std::iter::once(self.path.as_str())
            .chain(self.companion.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub key: String,
    pub label: String,
    pub color: String,
    pub files: Vec<CatalogEntry>,
}

impl CatalogSection {
    fn new(key: &str, label: &str, color: &str, files: Vec<CatalogEntry>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            files,
        }
    }
}

/// Read-only lookup table of every export, grouped by section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCatalog {
    pub sections: Vec<CatalogSection>,
}

impl FileCatalog {
    pub fn section(&self, key: &str) -> Option<&CatalogSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Entry by section and id. Ids repeat across sections.
    pub fn find(&self, section: &str, id: &str) -> Option<&CatalogEntry> {
        self.section(section)?.files.iter().find(|f| f.id == id)
    }

    /// First entry with this id, in section order
    pub fn find_by_id(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries().find(|f| f.id == id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.sections.iter().flat_map(|s| s.files.iter())
    }

    pub fn builtin() -> Self {
        use ViewKind::*;

        let analyse = vec![CatalogEntry::new(
            "mission-budget-strategy",
            ADS_CAMPAIGNS,
            "Stratégie Budget (€2000)",
            "Allocation du budget additionnel selon le coût par conversion",
        )
        .view(BudgetAllocation)];

        let mission = vec![
            CatalogEntry::new("campagnes", ADS_CAMPAIGNS, "Analyse Campagnes", "Classement et Performance")
                .view(CampaignRanking),
            CatalogEntry::new(
                "mission-appareils",
                ADS_DEVICES,
                "Comparatif Appareils",
                "SEO vs ADS sur les types d'appareils",
            )
            .view(DeviceComparison)
            .companion(SEO_DEVICES),
            CatalogEntry::new(
                "mission-heatmap",
                ADS_DAY_HOUR,
                "Heatmap Jour x Heure",
                "Intensité des clics par créneau",
            )
            .view(TimeHeatmap),
            CatalogEntry::new(
                "mission-demographie",
                ADS_SEX_AGE,
                "Profil Audience (Sexe x Âge)",
                "Répartition par tranche d'âge et sexe",
            )
            .view(Demographics),
            CatalogEntry::new(
                "mission-keywords",
                ADS_KEYWORDS,
                "Cannibalisation Mots-Clés",
                "Doublons SEO vs ADS",
            )
            .view(KeywordCannibalization)
            .companion(SEO_QUERIES),
            CatalogEntry::new(
                "mission-ctr",
                ADS_KEYWORDS,
                "Comparatif CTR (SEO vs ADS)",
                "Performance relative SEO vs ADS",
            )
            .view(CtrComparison)
            .companion(SEO_QUERIES),
            CatalogEntry::new(
                "mission-correlation",
                GA_PAGES,
                "Corrélation Analytics vs SEO",
                "Impact du SEO sur les vues GA4",
            )
            .view(PageCorrelation)
            .companion(SEO_PAGES),
            CatalogEntry::new(
                "mission-ads-orders",
                ADS_WEEKLY,
                "Ads vs Commandes",
                "Impact des dépenses Ads sur les ventes",
            )
            .view(AdsOrders)
            .companion(WEB_ORDERS),
            CatalogEntry::new(
                "mission-money-pits",
                ADS_KEYWORDS,
                "Top 10 Gouffres (Keywords)",
                "Mots-clés les plus coûteux",
            )
            .view(MoneyPits),
            CatalogEntry::new(
                "mission-seo-ctr",
                SEO_QUERIES,
                "Opportunités SEO (CTR)",
                "Requêtes à fort volume et faible CTR",
            )
            .view(SeoCtr),
            CatalogEntry::new(
                "mission-seo-quick-wins",
                SEO_RANKTRACKER,
                "SEO Quick Wins (Pos. 5-15)",
                "Mots-clés aux portes du podium",
            )
            .view(SeoQuickWins),
            CatalogEntry::new(
                "mission-ads-profitability",
                ADS_CAMPAIGNS,
                "Rentabilité Ads (Conv/Coût)",
                "Coût par acquisition par campagne",
            )
            .view(AdsProfitability),
            CatalogEntry::new(
                "mission-seo-country",
                SEO_COUNTRIES,
                "Analyse Pays (Trafic & CTR)",
                "Répartition géographique du trafic organique",
            )
            .view(SeoCountry),
        ];

        let ads = vec![
            CatalogEntry::new("campagnes", ADS_CAMPAIGNS, "Campagnes", "Performance par campagne (coût, clics, conversions)"),
            CatalogEntry::new("mots-cles", ADS_KEYWORDS, "Mots-clés", "Performance des mots-clés (coût, clics, CTR)"),
            CatalogEntry::new("recherches-mot", "/data/ads/Recherches(Mot_2025.08.03-2026.01.29).csv", "Recherches (mots)", "Mots déclencheurs et leur volume"),
            CatalogEntry::new("recherches-requete", "/data/ads/Recherches(Rechercher_2025.08.03-2026.01.29).csv", "Recherches (requêtes)", "Requêtes exactes des utilisateurs"),
            CatalogEntry::new("reseaux", "/data/ads/Reseaux(2025.08.03-2026.01.29).csv", "Réseaux", "Répartition par réseau (Search, Display…)"),
            CatalogEntry::new("appareils", ADS_DEVICES, "Appareils", "Performance par type d'appareil"),
            CatalogEntry::new("demo-sexe", "/data/ads/Donnees_demographiques(Sexe_2025.08.03-2026.01.29).csv", "Démographie (sexe)", "Répartition homme/femme"),
            CatalogEntry::new("demo-age", "/data/ads/Donnees_demographiques(Age_2025.08.03-2026.01.29).csv", "Démographie (âge)", "Répartition par tranche d'âge"),
            CatalogEntry::new("demo-sexe-age", ADS_SEX_AGE, "Démographie (sexe × âge)", "Croisement sexe et âge"),
            CatalogEntry::new("jour-heure", ADS_DAY_HOUR, "Jour × Heure", "Heatmap jour/heure des clics"),
            CatalogEntry::new("jour", "/data/ads/Jour_et_heure(Jour_2025.08.03-2026.01.29).csv", "Par jour", "Clics par jour de la semaine"),
            CatalogEntry::new("heure", "/data/ads/Jour_et_heure(Heure_2025.08.03-2026.01.29).csv", "Par heure", "Clics par créneau horaire"),
            CatalogEntry::new("serie-temporelle", ADS_WEEKLY, "Série temporelle (semaine)", "Évolution hebdomadaire (clics, CPC, impressions, coût)"),
            CatalogEntry::new("serie-temporelle-jour", "/data/ads/Graphique_de_serie_temporelle(2025.08.03-2026.01.29).csv", "Série temporelle (jour)", "Impressions quotidiennes"),
            CatalogEntry::new("score-opti", "/data/ads/Score_doptimisation(2025.08.03-2026.01.29).csv", "Score d'optimisation", "Score d'optimisation par campagne"),
            CatalogEntry::new("variations", "/data/ads/Plus_fortes_variations(2025.08.03-2026.01.29_par_rapport_a_2025.02.04-2025.08.02).csv", "Plus fortes variations", "Comparaison période précédente"),
        ];

        let analytics = vec![
            CatalogEntry::new("acquisition", "/data/analytics/Vue_densemble_de_lacquisition (3).csv", "Acquisition", "Vue d'ensemble de l'acquisition (GA4)"),
            CatalogEntry::new("retention", "/data/analytics/Vue_densemble_de_la_retention.csv", "Rétention", "Rétention des nouveaux utilisateurs (cohorte jour par jour)"),
            CatalogEntry::new("pages-ecrans", GA_PAGES, "Pages & écrans", "Vues, utilisateurs actifs, durée d'engagement, événements, revenu par page"),
            CatalogEntry::new("engagement", "/data/analytics/Vue_densemble_de_lengagement.csv", "Engagement", "Durée d'engagement moyenne par jour"),
            CatalogEntry::new("snapshot", "/data/analytics/Instantane_des_rapports (2).csv", "Instantané", "Résumé global (utilisateurs actifs, nouveaux, sessions, engagement)"),
        ];

        let seo = vec![
            CatalogEntry::new("requetes", SEO_QUERIES, "Requêtes", "Mots-clés organiques (clics, impressions, CTR, position)"),
            CatalogEntry::new("pages", SEO_PAGES, "Pages", "Performance par page"),
            CatalogEntry::new("appareils-seo", SEO_DEVICES, "Appareils", "Performance par appareil"),
            CatalogEntry::new("pays", SEO_COUNTRIES, "Pays", "Performance par pays"),
            CatalogEntry::new("apparence", "/data/seo/Apparence dans les resultats de recherche.csv", "Apparence recherche", "Types de résultats (extraits, fiches…)"),
            CatalogEntry::new("graphique-seo", "/data/seo/Graphique.csv", "Série temporelle", "Évolution quotidienne (clics, impressions, CTR, position)"),
            CatalogEntry::new("filtres", "/data/seo/Filtres.csv", "Filtres", "Filtres appliqués à l'export"),
            CatalogEntry::new("ranktracker", SEO_RANKTRACKER, "Rank Tracker", "Positions Google (mobile + desktop), volume de recherche, visibilité"),
        ];

        let web = vec![CatalogEntry::new(
            "commandes",
            WEB_ORDERS,
            "Commandes",
            "Historique des commandes (client, date, nb produits, montant TTC)",
        )];

        Self {
            sections: vec![
                CatalogSection::new("analyse", "Analyse", "#FF3D00", analyse),
                CatalogSection::new("mission", "Mission", "#FFD700", mission),
                CatalogSection::new("ads", "Google Ads", "#4285F4", ads),
                CatalogSection::new("analytics", "Analytics", "#E37400", analytics),
                CatalogSection::new("seo", "Search Console (SEO)", "#34A853", seo),
                CatalogSection::new("web", "Site web (commandes)", "#7B1FA2", web),
            ],
        }
    }
}

impl Default for FileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_views_declare_companions() {
        let catalog = FileCatalog::builtin();
        for entry in catalog.entries() {
            assert_eq!(
                entry.view.is_joined(),
                entry.companion.is_some(),
                "{} ({})",
                entry.id,
                entry.view
            );
        }
    }

    #[test]
    fn test_lookup_by_section_and_id() {
        let catalog = FileCatalog::builtin();
        assert_eq!(
            catalog.find("mission", "campagnes").map(|e| e.view),
            Some(ViewKind::CampaignRanking)
        );
        assert_eq!(
            catalog.find("ads", "campagnes").map(|e| e.view),
            Some(ViewKind::Table)
        );
        assert_eq!(
            catalog.find_by_id("campagnes").map(|e| e.view),
            Some(ViewKind::CampaignRanking)
        );
        assert!(catalog.find("seo", "nope").is_none());
    }

    #[test]
    fn test_resources_lists_primary_first() {
        let catalog = FileCatalog::builtin();
        let entry = catalog.find("mission", "mission-keywords").unwrap();
        assert_eq!(entry.resources(), vec![ADS_KEYWORDS, SEO_QUERIES]);
    }
}
