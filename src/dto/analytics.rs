use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::validate_not_blank;
use crate::common::{percentage, round_to};
use crate::entities::backorder_record::Model as BackorderRecord;
use crate::ml::backorder::{self, FeatureScore};

pub use crate::ml::backorder::Priority;

/// Label used for rows whose category is missing
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Averages for one side of the backorder split
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupAverages {
    pub stock: Option<f64>,
    pub lead_time: Option<f64>,
    pub forecast: Option<f64>,
}

impl GroupAverages {
    /// Averages over `records`; a field is `None` when no record carries a value
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a BackorderRecord>) -> Self {
        let mut count = 0u64;
        let mut stock = 0.0;
        let mut forecast = 0.0;
        let mut lead_time_sum = 0.0;
        let mut lead_time_count = 0u64;

        for record in records {
            count += 1;
            stock += f64::from(record.national_inv);
            forecast += f64::from(record.forecast_3_month);
            if let Some(lead_time) = record.lead_time {
                lead_time_sum += f64::from(lead_time);
                lead_time_count += 1;
            }
        }

        let mean = |sum: f64, n: u64| (n > 0).then(|| round_to(sum / n as f64, 2));
        Self {
            stock: mean(stock, count),
            lead_time: mean(lead_time_sum, lead_time_count),
            forecast: mean(forecast, count),
        }
    }
}

/// Aggregate backorder statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_records: u64,
    pub backorder_count: u64,
    /// Percentage of records that went on backorder
    pub backorder_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_stock_backorder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_stock_no_backorder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_lead_time_backorder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_lead_time_no_backorder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_forecast_backorder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_forecast_no_backorder: Option<f64>,
}

impl AnalyticsOverview {
    /// Counts and rate only; the shape older dashboards consume
    pub fn summary(total_records: u64, backorder_count: u64) -> Self {
        Self {
            total_records,
            backorder_count,
            backorder_rate: percentage(backorder_count, total_records),
            avg_stock_backorder: None,
            avg_stock_no_backorder: None,
            avg_lead_time_backorder: None,
            avg_lead_time_no_backorder: None,
            avg_forecast_backorder: None,
            avg_forecast_no_backorder: None,
        }
    }

    pub fn detailed(
        total_records: u64,
        backorder_count: u64,
        backorder: GroupAverages,
        no_backorder: GroupAverages,
    ) -> Self {
        Self {
            avg_stock_backorder: backorder.stock,
            avg_stock_no_backorder: no_backorder.stock,
            avg_lead_time_backorder: backorder.lead_time,
            avg_lead_time_no_backorder: no_backorder.lead_time,
            avg_forecast_backorder: backorder.forecast,
            avg_forecast_no_backorder: no_backorder.forecast,
            ..Self::summary(total_records, backorder_count)
        }
    }
}

/// One SKU's prediction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackorderPrediction {
    pub sku: String,
    pub category: Option<String>,
    pub current_stock: i32,
    pub in_transit_qty: i32,
    pub forecast_3_month: i32,
    pub lead_time: Option<i32>,
    pub backorder_probability: f64,
    pub recommended_quantity: i64,
    pub priority: Priority,
}

impl From<&BackorderRecord> for BackorderPrediction {
    fn from(record: &BackorderRecord) -> Self {
        let probability = backorder::estimate_probability(record);
        Self {
            sku: record.sku.clone(),
            category: record.category.clone(),
            current_stock: record.national_inv,
            in_transit_qty: record.in_transit_qty,
            forecast_3_month: record.forecast_3_month,
            lead_time: record.lead_time,
            backorder_probability: probability,
            recommended_quantity: backorder::recommended_quantity(record),
            priority: Priority::from_probability(probability),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    pub sku: String,
    pub current_stock: i32,
    pub forecast_3_month: i32,
    pub went_on_backorder: bool,
}

impl From<&BackorderRecord> for CorrelationPoint {
    fn from(record: &BackorderRecord) -> Self {
        Self {
            sku: record.sku.clone(),
            current_stock: record.national_inv,
            forecast_3_month: record.forecast_3_month,
            went_on_backorder: record.went_on_backorder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistribution {
    pub category: String,
    pub count: u64,
    pub backorder_count: u64,
    /// Percentage of the category that went on backorder
    pub backorder_rate: f64,
}

impl CategoryDistribution {
    pub fn new(category: impl Into<String>, count: u64, backorder_count: u64) -> Self {
        Self {
            category: category.into(),
            count,
            backorder_count,
            backorder_rate: percentage(backorder_count, count),
        }
    }
}

/// Correlation between stock and forecast plus per-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationAnalysis {
    /// Pearson coefficient between current stock and 3-month forecast
    pub stock_forecast_correlation: Option<f64>,
    pub sample_size: usize,
    pub points: Vec<CorrelationPoint>,
    pub category_distributions: Vec<CategoryDistribution>,
}

impl CorrelationAnalysis {
    pub fn new(points: Vec<CorrelationPoint>, rows: Option<&[Value]>) -> Self {
        let (stock, forecast): (Vec<f64>, Vec<f64>) = points
            .iter()
            .map(|p| (f64::from(p.current_stock), f64::from(p.forecast_3_month)))
            .unzip();

        Self {
            stock_forecast_correlation: backorder::pearson(&stock, &forecast)
                .map(|r| round_to(r, 4)),
            sample_size: points.len(),
            points,
            category_distributions: category_distributions(rows),
        }
    }
}

/// Reads a count column that drivers may return as an integer, a float or text
fn count_field(row: &Value, key: &str) -> u64 {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| *v > 0.0).map(|v| v as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .ok()
            .or_else(|| {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| *v > 0.0)
                    .map(|v| v as u64)
            })
            .unwrap_or(0),
        _ => 0,
    }
}

fn category_field(row: &Value) -> String {
    match row.get("category") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Projects loosely typed `{category, count, backorderCount}` rows into distributions.
///
/// Absent input yields an empty list. Missing or unreadable counts become 0.
pub fn category_distributions(rows: Option<&[Value]>) -> Vec<CategoryDistribution> {
    rows.unwrap_or_default()
        .iter()
        .map(|row| {
            CategoryDistribution::new(
                category_field(row),
                count_field(row, "count"),
                count_field(row, "backorderCount"),
            )
        })
        .collect()
}

/// One feature's importance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
}

impl FeatureImportance {
    /// Name and score only, as served before insights existed
    pub fn new(feature: impl Into<String>, importance: f64) -> Self {
        Self::with_insights(feature, importance, Vec::new())
    }

    pub fn with_insights(feature: impl Into<String>, importance: f64, insights: Vec<String>) -> Self {
        Self {
            feature: feature.into(),
            importance,
            insights,
        }
    }
}

impl From<&FeatureScore> for FeatureImportance {
    fn from(score: &FeatureScore) -> Self {
        Self::with_insights(score.feature, round_to(score.importance, 4), score.insights())
    }
}

/// One record in an ingest batch
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackorderRecordInput {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub sku: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub national_inv: i32,
    #[validate(range(min = 0))]
    pub lead_time: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub in_transit_qty: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub forecast_3_month: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub sales_3_month: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub min_bank: i32,
    pub perf_6_month_avg: Option<f64>,
    #[serde(default)]
    pub went_on_backorder: bool,
    #[validate(range(min = 0.0, max = 1.0))]
    pub backorder_probability: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestBackorderRecordsRequest {
    pub records: Vec<BackorderRecordInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestBackorderRecordsResponse {
    pub stored: u64,
}
