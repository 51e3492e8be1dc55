// ============================================================
// ANALYSIS SERVICE
// ============================================================
// Resolve a catalog entry, load its exports, run the view's analysis

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::analyses;
use super::csv_loader::CsvLoader;
use super::view_session::ViewSession;
use crate::domain::analysis::AnalysisReport;
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::catalog::{CatalogEntry, FileCatalog, ViewKind};
use crate::domain::csv::CsvRow;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv::ColumnClassifier;
use crate::infrastructure::fetch::ResourceFetcher;

pub struct AnalysisService {
    loader: CsvLoader,
    classifier: ColumnClassifier,
    config: AnalysisConfig,
    catalog: FileCatalog,
    session: ViewSession,
}

impl AnalysisService {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, config: &AppConfig) -> Self {
        Self {
            loader: CsvLoader::new(fetcher, &config.ingestion),
            classifier: ColumnClassifier::new(config.ingestion.clone()),
            config: config.analysis.clone(),
            catalog: FileCatalog::builtin(),
            session: ViewSession::new(),
        }
    }

    pub fn catalog(&self) -> &FileCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &ColumnClassifier {
        &self.classifier
    }

    /// Catalog entry by section and id
    pub fn entry(&self, section: &str, id: &str) -> Result<&CatalogEntry> {
        self.catalog
            .find(section, id)
            .ok_or_else(|| AppError::NotFound(format!("catalog entry {}/{}", section, id)))
    }

    /// Raw rows of one resource
    pub async fn load(&self, path: &str) -> Result<Vec<CsvRow>> {
        self.loader.load(path).await
    }

    /// Run the entry's view. Joined views load both exports concurrently and
    /// fail if either does.
    pub async fn analyze(&self, entry: &CatalogEntry) -> Result<AnalysisReport> {
        let start = Instant::now();

        let report = if entry.view.is_joined() {
            let companion = entry.companion.as_deref().ok_or_else(|| {
                AppError::ValidationError(format!(
                    "{} view of '{}' has no companion export",
                    entry.view, entry.id
                ))
            })?;
            let (primary, companion) = self.loader.load_pair(&entry.path, companion).await?;
            self.joined(entry.view, &primary, &companion)?
        } else {
            let rows = self.loader.load(&entry.path).await?;
            self.single(entry.view, rows)?
        };

        let audit = report.audit();
        if !audit.is_clean() {
            warn!(
                entry = %entry.id,
                view = %entry.view,
                fallbacks = audit.total(),
                excluded = audit.excluded_rows,
                columns = ?audit.missing.keys().collect::<Vec<_>>(),
                "Metrics fell back to the missing-value policy"
            );
        }

        info!(
            entry = %entry.id,
            view = %entry.view,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "View analyzed"
        );
        Ok(report)
    }

    /// [`analyze`](Self::analyze) for a display slot. When another request
    /// for the same slot started meanwhile, this one resolves to
    /// `AppError::Stale` instead of its result.
    pub async fn open(&self, slot: &str, entry: &CatalogEntry) -> Result<AnalysisReport> {
        let token = self.session.begin(slot);
        let result = self.analyze(entry).await;
        self.session.commit(&token, result)
    }

    fn single(&self, view: ViewKind, rows: Vec<CsvRow>) -> Result<AnalysisReport> {
        let config = &self.config;
        let report = match view {
            ViewKind::Table => {
                AnalysisReport::Table(analyses::table_view(rows, &self.classifier, config))
            }
            ViewKind::CampaignRanking => {
                AnalysisReport::CampaignRanking(analyses::campaign_ranking(&rows, config))
            }
            ViewKind::TimeHeatmap => {
                AnalysisReport::TimeHeatmap(analyses::time_heatmap(&rows, config))
            }
            ViewKind::Demographics => {
                AnalysisReport::Demographics(analyses::demographics(&rows, config))
            }
            ViewKind::MoneyPits => AnalysisReport::MoneyPits(analyses::money_pits(&rows, config)),
            ViewKind::SeoCtr => AnalysisReport::SeoCtr(analyses::seo_ctr(&rows, config)),
            ViewKind::SeoQuickWins => {
                AnalysisReport::SeoQuickWins(analyses::seo_quick_wins(&rows, config))
            }
            ViewKind::AdsProfitability => {
                AnalysisReport::AdsProfitability(analyses::ads_profitability(&rows, config))
            }
            ViewKind::SeoCountry => AnalysisReport::SeoCountry(analyses::seo_country(&rows, config)),
            ViewKind::BudgetAllocation => {
                AnalysisReport::BudgetAllocation(analyses::budget_allocation(&rows, config))
            }
            joined => {
                return Err(AppError::Internal(format!(
                    "{} needs a companion export",
                    joined
                )))
            }
        };
        Ok(report)
    }

    fn joined(
        &self,
        view: ViewKind,
        primary: &[CsvRow],
        companion: &[CsvRow],
    ) -> Result<AnalysisReport> {
        let config = &self.config;
        let report = match view {
            ViewKind::DeviceComparison => AnalysisReport::DeviceComparison(
                analyses::device_comparison(primary, companion, config),
            ),
            ViewKind::KeywordCannibalization => AnalysisReport::KeywordCannibalization(
                analyses::keyword_cannibalization(primary, companion, config),
            ),
            ViewKind::CtrComparison => AnalysisReport::CtrComparison(analyses::ctr_comparison(
                primary, companion, config,
            )),
            ViewKind::PageCorrelation => AnalysisReport::PageCorrelation(
                analyses::page_correlation(primary, companion, config),
            ),
            ViewKind::AdsOrders => {
                AnalysisReport::AdsOrders(analyses::ads_orders(primary, companion, config))
            }
            single => {
                return Err(AppError::Internal(format!(
                    "{} reads a single export",
                    single
                )))
            }
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fetch::MemoryFetcher;
    use std::time::Duration;

    const ADS_KEYWORDS_CSV: &str = "\
# Rapport sur les mots clés
# 3 août 2025 - 29 janvier 2026
Mot clé pour le Réseau de Recherche,Clics,Coût,CTR
fer forgé,120,\"35,00 €\",\"5,10 %\"
portail alu,10,\"4,00 €\",\"2,00 %\"
";

    const SEO_QUERIES_CSV: &str = "\
Requêtes les plus fréquentes,Clics,Impressions,CTR,Position
Fer Forgé,340,9000,3.78%,4.2
";

    fn service(fetcher: MemoryFetcher) -> AnalysisService {
        AnalysisService::new(Arc::new(fetcher), &AppConfig::default())
    }

    fn path(section: &str, id: &str) -> String {
        FileCatalog::builtin()
            .find(section, id)
            .map(|e| e.path.clone())
            .unwrap()
    }

    fn companion(section: &str, id: &str) -> String {
        FileCatalog::builtin()
            .find(section, id)
            .and_then(|e| e.companion.clone())
            .unwrap()
    }

    #[tokio::test]
    async fn test_joined_view_end_to_end() {
        let fetcher = MemoryFetcher::new()
            .with_resource(&path("mission", "mission-keywords"), ADS_KEYWORDS_CSV)
            .with_resource(&companion("mission", "mission-keywords"), SEO_QUERIES_CSV);
        let service = service(fetcher);

        let entry = service.entry("mission", "mission-keywords").unwrap().clone();
        let report = service.analyze(&entry).await.unwrap();

        match report {
            AnalysisReport::KeywordCannibalization(r) => {
                assert_eq!(r.overlaps.len(), 1);
                assert_eq!(r.overlaps[0].keyword, "Fer Forgé");
                assert_eq!(r.overlaps[0].total, 460.0);
            }
            other => panic!("unexpected view {}", other.view()),
        }
    }

    #[tokio::test]
    async fn test_joined_view_fails_when_companion_missing() {
        let fetcher = MemoryFetcher::new()
            .with_resource(&path("mission", "mission-keywords"), ADS_KEYWORDS_CSV);
        let service = service(fetcher);

        let entry = service.entry("mission", "mission-ctr").unwrap().clone();
        let err = service.analyze(&entry).await.unwrap_err();

        assert_eq!(err, AppError::NotFound(companion("mission", "mission-ctr")));
    }

    #[tokio::test]
    async fn test_same_id_resolves_per_section() {
        let campaigns = "Nom de la campagne,Coût,Clics,Conversions\nPmax,\"10,00 €\",5,1\n";
        let fetcher = MemoryFetcher::new().with_resource(&path("ads", "campagnes"), campaigns);
        let service = service(fetcher);

        let mission = service.entry("mission", "campagnes").unwrap().clone();
        let ads = service.entry("ads", "campagnes").unwrap().clone();

        assert_eq!(
            service.analyze(&mission).await.unwrap().view(),
            ViewKind::CampaignRanking
        );
        assert_eq!(service.analyze(&ads).await.unwrap().view(), ViewKind::Table);
    }

    #[tokio::test]
    async fn test_joined_entry_without_companion_is_rejected() {
        let service = service(MemoryFetcher::new());
        let entry = CatalogEntry {
            id: "orphan".to_string(),
            path: "/data/ads/x.csv".to_string(),
            label: "Orphan".to_string(),
            description: String::new(),
            view: ViewKind::DeviceComparison,
            companion: None,
        };

        let err = service.analyze(&entry).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_unknown_entry() {
        let service = service(MemoryFetcher::new());
        assert!(service.entry("mission", "absent").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_slow_superseded_request_is_stale() {
        let slow = path("seo", "pays");
        let fast = path("seo", "requetes");
        let fetcher = MemoryFetcher::new()
            .with_resource(&slow, "Pays,Clics,CTR,Position\nFrance,10,1.5%,3.5\n")
            .with_resource(&fast, SEO_QUERIES_CSV)
            .with_delay(&slow, Duration::from_millis(200));
        let service = service(fetcher);

        let slow_entry = service.entry("seo", "pays").unwrap().clone();
        let fast_entry = service.entry("seo", "requetes").unwrap().clone();

        let (first, second) = tokio::join!(service.open("viewer", &slow_entry), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            service.open("viewer", &fast_entry).await
        });

        assert!(first.unwrap_err().is_stale());
        assert_eq!(second.unwrap().view(), ViewKind::Table);
    }

    #[tokio::test]
    async fn test_fallbacks_are_reported() {
        let heatmap = "Jour,Heure de début,Clics\nLundi,07 h,--\nMardi,08 h,4\n";
        let fetcher = MemoryFetcher::new().with_resource(&path("mission", "mission-heatmap"), heatmap);
        let service = service(fetcher);

        let entry = service.entry("mission", "mission-heatmap").unwrap().clone();
        let report = service.analyze(&entry).await.unwrap();

        assert_eq!(report.audit().missing.get("Clics"), Some(&1));
    }
}
