use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::round_to;
use crate::entities::backorder_record::Model as BackorderRecord;

/// Steepness of the logistic curve used when no stored score exists
const HEURISTIC_STEEPNESS: f64 = 4.0;

pub const HIGH_PRIORITY_THRESHOLD: f64 = 0.7;
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 0.4;

/// Urgency bucket for a replenishment recommendation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_PRIORITY_THRESHOLD {
            Priority::High
        } else if probability >= MEDIUM_PRIORITY_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// Stock on hand plus in transit over the 3-month forecast; 1.0 covers the full three months
pub fn coverage_ratio(national_inv: i32, in_transit_qty: i32, forecast_3_month: i32) -> f64 {
    let available = f64::from(national_inv) + f64::from(in_transit_qty);
    available / f64::from(forecast_3_month.max(1))
}

/// Logistic estimate centred on full coverage: 0.5 at ratio 1, approaching 1 as stock runs out
pub fn heuristic_probability(coverage: f64) -> f64 {
    1.0 / (1.0 + (HEURISTIC_STEEPNESS * (coverage - 1.0)).exp())
}

/// Stored score when present, otherwise the coverage heuristic. Always in `[0, 1]`, 4 decimals.
pub fn estimate_probability(record: &BackorderRecord) -> f64 {
    let raw = record.backorder_probability.unwrap_or_else(|| {
        heuristic_probability(coverage_ratio(
            record.national_inv,
            record.in_transit_qty,
            record.forecast_3_month,
        ))
    });
    round_to(raw.clamp(0.0, 1.0), 4)
}

/// Units needed to cover the forecast plus the minimum bank
pub fn recommended_quantity(record: &BackorderRecord) -> i64 {
    let needed = i64::from(record.forecast_3_month) + i64::from(record.min_bank)
        - i64::from(record.national_inv)
        - i64::from(record.in_transit_qty);
    needed.max(0)
}

/// Pearson correlation coefficient.
///
/// `None` when the inputs differ in length, have fewer than two points, or
/// either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    Some(covariance / (variance_x.sqrt() * variance_y.sqrt()))
}

type FeatureExtractor = fn(&BackorderRecord) -> Option<f64>;

const FEATURES: [(&str, FeatureExtractor); 7] = [
    ("national_inv", |r| Some(f64::from(r.national_inv))),
    ("lead_time", |r| r.lead_time.map(f64::from)),
    ("in_transit_qty", |r| Some(f64::from(r.in_transit_qty))),
    ("forecast_3_month", |r| Some(f64::from(r.forecast_3_month))),
    ("sales_3_month", |r| Some(f64::from(r.sales_3_month))),
    ("min_bank", |r| Some(f64::from(r.min_bank))),
    ("perf_6_month_avg", |r| r.perf_6_month_avg),
];

/// Score of one input feature against the backorder label
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScore {
    pub feature: &'static str,
    /// Normalised share of the total absolute correlation
    pub importance: f64,
    /// Signed correlation with `went_on_backorder`, if measurable
    pub correlation: Option<f64>,
}

impl FeatureScore {
    pub fn insights(&self) -> Vec<String> {
        match self.correlation {
            Some(r) if r != 0.0 => {
                let strength = match r.abs() {
                    v if v >= 0.5 => "strong",
                    v if v >= 0.2 => "moderate",
                    _ => "weak",
                };
                let direction = if r > 0.0 { "more" } else { "fewer" };
                vec![
                    format!(
                        "Higher {} is associated with {} backorders",
                        self.feature, direction
                    ),
                    format!("{} relationship (r = {:.3})", strength, r),
                ]
            }
            _ => vec!["No measurable relationship with backorders".to_string()],
        }
    }
}

/// Ranks features by absolute correlation with `went_on_backorder`.
///
/// Importances sum to 1, or are all zero when no feature carries signal.
/// Result is sorted by importance, highest first.
pub fn feature_importance(records: &[BackorderRecord]) -> Vec<FeatureScore> {
    let mut scores: Vec<FeatureScore> = FEATURES
        .iter()
        .map(|(name, extract)| {
            let (xs, ys): (Vec<f64>, Vec<f64>) = records
                .iter()
                .filter_map(|record| {
                    let label = if record.went_on_backorder { 1.0 } else { 0.0 };
                    extract(record).map(|value| (value, label))
                })
                .unzip();
            FeatureScore {
                feature: *name,
                importance: 0.0,
                correlation: pearson(&xs, &ys),
            }
        })
        .collect();

    let total: f64 = scores
        .iter()
        .filter_map(|s| s.correlation)
        .map(f64::abs)
        .sum();

    if total > 0.0 {
        for score in &mut scores {
            score.importance = score.correlation.map(|r| r.abs() / total).unwrap_or(0.0);
        }
    }

    scores.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    scores
}
