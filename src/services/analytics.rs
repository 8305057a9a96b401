use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JsonValue,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::analytics::{
        AnalyticsOverview, BackorderPrediction, BackorderRecordInput, CorrelationAnalysis,
        CorrelationPoint, FeatureImportance, GroupAverages,
    },
    entities::backorder_record::{self, Column as RecordColumn, Entity as BackorderRecord},
    errors::ServiceError,
    ml,
    tracing::with_timing,
};

pub const MAX_INGEST_BATCH: usize = 1000;

/// Rows per INSERT; 13 binds each keeps a chunk under SQLite's 999 parameter cap
const INGEST_CHUNK: usize = 50;

/// Everything but `id` and `sku` is replaced when a SKU is already stored
const UPSERT_COLUMNS: [RecordColumn; 11] = [
    RecordColumn::Category,
    RecordColumn::NationalInv,
    RecordColumn::LeadTime,
    RecordColumn::InTransitQty,
    RecordColumn::Forecast3Month,
    RecordColumn::Sales3Month,
    RecordColumn::MinBank,
    RecordColumn::Perf6MonthAvg,
    RecordColumn::WentOnBackorder,
    RecordColumn::BackorderProbability,
    RecordColumn::RecordedAt,
];

const CATEGORY_DISTRIBUTION_SQL: &str = r#"SELECT category, COUNT(*) AS count, SUM(CASE WHEN went_on_backorder THEN 1 ELSE 0 END) AS "backorderCount" FROM backorder_records GROUP BY category ORDER BY count DESC"#;

/// Backorder dashboard queries
#[derive(Clone)]
pub struct AnalyticsService {
    db: Arc<DbPool>,
}

impl AnalyticsService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Inserts or replaces records keyed by SKU inside one transaction.
    /// A SKU repeated within the batch keeps its last occurrence and counts once.
    #[instrument(skip(self, records), fields(batch_size = records.len()))]
    pub async fn ingest_records(
        &self,
        records: Vec<BackorderRecordInput>,
    ) -> Result<u64, ServiceError> {
        if records.is_empty() || records.len() > MAX_INGEST_BATCH {
            return Err(ServiceError::ValidationError(format!(
                "Batch must contain between 1 and {} records",
                MAX_INGEST_BATCH
            )));
        }
        for (index, record) in records.iter().enumerate() {
            record.validate().map_err(|e| {
                ServiceError::ValidationError(format!("records[{}]: {}", index, e))
            })?;
        }

        let rows = latest_per_sku(records);
        let now = Utc::now();
        let txn = self.db.begin().await?;
        let mut stored = 0u64;

        for chunk in rows.chunks(INGEST_CHUNK) {
            let models = chunk.iter().cloned().map(|input| backorder_record::ActiveModel {
                id: Set(Uuid::new_v4()),
                sku: Set(input.sku),
                category: Set(input.category),
                national_inv: Set(input.national_inv),
                lead_time: Set(input.lead_time),
                in_transit_qty: Set(input.in_transit_qty),
                forecast_3_month: Set(input.forecast_3_month),
                sales_3_month: Set(input.sales_3_month),
                min_bank: Set(input.min_bank),
                perf_6_month_avg: Set(input.perf_6_month_avg),
                went_on_backorder: Set(input.went_on_backorder),
                backorder_probability: Set(input.backorder_probability),
                recorded_at: Set(now),
            });

            BackorderRecord::insert_many(models)
                .on_conflict(
                    OnConflict::column(RecordColumn::Sku)
                        .update_columns(UPSERT_COLUMNS)
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
            stored += chunk.len() as u64;
        }

        txn.commit().await?;
        info!(stored, "Backorder records ingested");
        Ok(stored)
    }

    /// Counts and backorder rate; group averages when `detailed`
    #[instrument(skip(self))]
    pub async fn overview(&self, detailed: bool) -> Result<AnalyticsOverview, ServiceError> {
        let db = &*self.db;

        if !detailed {
            let total = BackorderRecord::find().count(db).await?;
            let backorders = BackorderRecord::find()
                .filter(RecordColumn::WentOnBackorder.eq(true))
                .count(db)
                .await?;
            return Ok(AnalyticsOverview::summary(total, backorders));
        }

        let records = BackorderRecord::find().all(db).await?;
        let (backorder, no_backorder): (Vec<_>, Vec<_>) =
            records.iter().partition(|r| r.went_on_backorder);

        Ok(AnalyticsOverview::detailed(
            records.len() as u64,
            backorder.len() as u64,
            GroupAverages::from_records(backorder),
            GroupAverages::from_records(no_backorder),
        ))
    }

    /// Highest-risk SKUs first
    #[instrument(skip(self))]
    pub async fn predictions(
        &self,
        limit: u64,
        min_probability: Option<f64>,
    ) -> Result<Vec<BackorderPrediction>, ServiceError> {
        if let Some(min) = min_probability {
            if !(0.0..=1.0).contains(&min) {
                return Err(ServiceError::ValidationError(
                    "minProbability must be between 0 and 1".to_string(),
                ));
            }
        }

        let records = BackorderRecord::find()
            .order_by_asc(RecordColumn::Sku)
            .all(&*self.db)
            .await?;

        let mut predictions: Vec<BackorderPrediction> = records
            .iter()
            .map(BackorderPrediction::from)
            .filter(|p| p.backorder_probability >= min_probability.unwrap_or(0.0))
            .collect();

        predictions.sort_by(|a, b| {
            b.backorder_probability
                .total_cmp(&a.backorder_probability)
                .then_with(|| a.sku.cmp(&b.sku))
        });
        predictions.truncate(limit as usize);
        Ok(predictions)
    }

    /// Stock/forecast correlation over a sample plus per-category distributions
    #[instrument(skip(self))]
    pub async fn correlation(&self, sample_size: u64) -> Result<CorrelationAnalysis, ServiceError> {
        let db = &*self.db;

        with_timing("correlation_analysis", || async move {
            let points: Vec<CorrelationPoint> = BackorderRecord::find()
                .order_by_asc(RecordColumn::Sku)
                .limit(sample_size)
                .all(db)
                .await?
                .iter()
                .map(CorrelationPoint::from)
                .collect();

            let rows = JsonValue::find_by_statement(Statement::from_string(
                db.get_database_backend(),
                CATEGORY_DISTRIBUTION_SQL,
            ))
            .all(db)
            .await?;

            Ok::<_, ServiceError>(CorrelationAnalysis::new(points, Some(rows.as_slice())))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn feature_importance(&self) -> Result<Vec<FeatureImportance>, ServiceError> {
        with_timing("feature_importance", || async move {
            let records = BackorderRecord::find().all(&*self.db).await?;
            Ok::<_, ServiceError>(
                ml::feature_importance(&records)
                    .iter()
                    .map(FeatureImportance::from)
                    .collect(),
            )
        })
        .await
    }
}

/// Collapses repeated SKUs to their last occurrence, keeping first-seen order.
/// A single upsert statement may not touch the same row twice.
fn latest_per_sku(records: Vec<BackorderRecordInput>) -> Vec<BackorderRecordInput> {
    let mut position: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut rows: Vec<BackorderRecordInput> = Vec::with_capacity(records.len());
    for record in records {
        match position.get(&record.sku) {
            Some(&index) => rows[index] = record,
            None => {
                position.insert(record.sku.clone(), rows.len());
                rows.push(record);
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrated_memory_pool;
    use crate::dto::analytics::{Priority, UNCATEGORIZED};
    use assert_matches::assert_matches;

    fn input(sku: &str, stock: i32, forecast: i32, backorder: bool) -> BackorderRecordInput {
        BackorderRecordInput {
            sku: sku.to_string(),
            category: Some("Tools".to_string()),
            national_inv: stock,
            lead_time: Some(4),
            in_transit_qty: 0,
            forecast_3_month: forecast,
            sales_3_month: forecast / 2,
            min_bank: 10,
            perf_6_month_avg: Some(0.8),
            went_on_backorder: backorder,
            backorder_probability: None,
        }
    }

    async fn seeded() -> AnalyticsService {
        let service = AnalyticsService::new(Arc::new(migrated_memory_pool().await));
        let mut uncategorized = input("SKU-D", 5, 60, true);
        uncategorized.category = None;
        service
            .ingest_records(vec![
                input("SKU-A", 0, 100, true),
                input("SKU-B", 400, 50, false),
                input("SKU-C", 250, 80, false),
                uncategorized,
            ])
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn ingest_upserts_by_sku() {
        let service = seeded().await;
        let stored = service
            .ingest_records(vec![input("SKU-A", 500, 100, false)])
            .await
            .unwrap();
        assert_eq!(stored, 1);

        let overview = service.overview(false).await.unwrap();
        assert_eq!(overview.total_records, 4);
        assert_eq!(overview.backorder_count, 1);
        assert_eq!(overview.backorder_rate, 25.0);
    }

    #[tokio::test]
    async fn repeated_sku_in_one_batch_keeps_last() {
        let service = AnalyticsService::new(Arc::new(migrated_memory_pool().await));
        let stored = service
            .ingest_records(vec![
                input("SKU-X", 10, 100, true),
                input("SKU-Y", 20, 100, false),
                input("SKU-X", 300, 100, false),
            ])
            .await
            .unwrap();
        assert_eq!(stored, 2);

        let overview = service.overview(true).await.unwrap();
        assert_eq!(overview.total_records, 2);
        assert_eq!(overview.backorder_count, 0);
        assert_eq!(overview.avg_stock_no_backorder, Some(160.0));
    }

    #[tokio::test]
    async fn large_batch_spans_several_inserts() {
        let service = AnalyticsService::new(Arc::new(migrated_memory_pool().await));
        let batch: Vec<_> = (0..MAX_INGEST_BATCH)
            .map(|i| input(&format!("SKU-{i:04}"), i as i32, 100, i % 4 == 0))
            .collect();
        assert_eq!(service.ingest_records(batch).await.unwrap(), 1000);

        let overview = service.overview(false).await.unwrap();
        assert_eq!(overview.total_records, 1000);
        assert_eq!(overview.backorder_count, 250);
    }

    #[tokio::test]
    async fn concurrent_batches_with_same_new_skus_both_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::db::DbConfig {
            url: format!("sqlite://{}?mode=rwc", dir.path().join("ingest.db").display()),
            max_connections: 4,
            min_connections: 1,
            ..Default::default()
        };
        let pool = crate::db::establish_connection_with_config(&config)
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        let service = AnalyticsService::new(Arc::new(pool));

        for round in 0..10 {
            let batch = |backorder: bool| -> Vec<BackorderRecordInput> {
                (0..50)
                    .map(|i| input(&format!("R{round}-{i}"), i, 100, backorder))
                    .collect()
            };
            let (first, second) = tokio::join!(
                service.ingest_records(batch(true)),
                service.ingest_records(batch(false)),
            );
            assert_eq!(first.unwrap(), 50);
            assert_eq!(second.unwrap(), 50);
        }

        let overview = service.overview(false).await.unwrap();
        assert_eq!(overview.total_records, 500);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let service = AnalyticsService::new(Arc::new(migrated_memory_pool().await));
        let err = service.ingest_records(Vec::new()).await.unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
    }

    #[tokio::test]
    async fn detailed_overview_splits_groups() {
        let service = seeded().await;
        let overview = service.overview(true).await.unwrap();
        assert_eq!(overview.backorder_count, 2);
        assert_eq!(overview.avg_stock_backorder, Some(2.5));
        assert_eq!(overview.avg_stock_no_backorder, Some(325.0));
        assert_eq!(overview.avg_lead_time_backorder, Some(4.0));
    }

    #[tokio::test]
    async fn predictions_are_sorted_and_filtered() {
        let service = seeded().await;
        let all = service.predictions(10, None).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all
            .windows(2)
            .all(|w| w[0].backorder_probability >= w[1].backorder_probability));
        assert_eq!(all[0].sku, "SKU-A");
        assert_eq!(all[0].priority, Priority::High);
        assert_eq!(all[0].recommended_quantity, 110);

        let risky = service.predictions(10, Some(0.7)).await.unwrap();
        assert!(risky.iter().all(|p| p.priority == Priority::High));

        let err = service.predictions(10, Some(1.5)).await.unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
    }

    #[tokio::test]
    async fn correlation_groups_categories() {
        let service = seeded().await;
        let analysis = service.correlation(500).await.unwrap();
        assert_eq!(analysis.sample_size, 4);
        assert!(analysis.stock_forecast_correlation.unwrap() < 0.0);

        let tools = analysis
            .category_distributions
            .iter()
            .find(|d| d.category == "Tools")
            .unwrap();
        assert_eq!(tools.count, 3);
        assert_eq!(tools.backorder_count, 1);
        assert_eq!(tools.backorder_rate, 33.33);
        assert!(analysis
            .category_distributions
            .iter()
            .any(|d| d.category == UNCATEGORIZED && d.count == 1));
    }

    #[tokio::test]
    async fn feature_importance_sums_to_one() {
        let service = seeded().await;
        let features = service.feature_importance().await.unwrap();
        let total: f64 = features.iter().map(|f| f.importance).sum();
        assert!((total - 1.0).abs() < 1e-3);
        assert!(features.iter().any(|f| !f.insights.is_empty()));
    }
}
