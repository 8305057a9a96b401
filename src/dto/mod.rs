//! Request and response shapes exchanged with HTTP clients.
//!
//! JSON keys are camelCase throughout.

use validator::ValidationError;

pub mod analytics;
pub mod checklist;
pub mod delivery_proof;
pub mod order;
pub mod product;
pub mod vehicle;

pub use analytics::{
    category_distributions, AnalyticsOverview, BackorderPrediction, CategoryDistribution,
    CorrelationAnalysis, CorrelationPoint, FeatureImportance, GroupAverages, Priority,
};
pub use checklist::{
    checklist_percentage, ChecklistProgressResponse, ChecklistStepCode, ChecklistStepResponse,
};
pub use delivery_proof::{
    CreateDeliveryProofRequest, DeliveryProofResponse, SimplifiedDeliveryProofResponse,
};
pub use order::{CreateOrderRequest, OrderListQuery, OrderResponse, UpdateOrderStatusRequest};
pub use product::{
    CreateProductRequest, ProductListQuery, ProductResponse, UpdateProductStatusRequest,
};
pub use vehicle::{CreateVehicleRequest, VehicleListQuery, VehicleResponse};

/// Rejects empty and whitespace-only strings
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}
