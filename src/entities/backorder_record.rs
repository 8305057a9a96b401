use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One SKU's inventory snapshot used by the backorder dashboard.
///
/// `backorder_probability` is written by the upstream scoring job and may be
/// missing for freshly ingested rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "backorder_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sku: String,
    pub category: Option<String>,
    /// Units currently on hand
    pub national_inv: i32,
    /// Supplier lead time in weeks
    pub lead_time: Option<i32>,
    pub in_transit_qty: i32,
    #[sea_orm(column_name = "forecast_3_month")]
    pub forecast_3_month: i32,
    #[sea_orm(column_name = "sales_3_month")]
    pub sales_3_month: i32,
    /// Minimum recommended stock
    pub min_bank: i32,
    #[sea_orm(column_name = "perf_6_month_avg")]
    pub perf_6_month_avg: Option<f64>,
    pub went_on_backorder: bool,
    pub backorder_probability: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
