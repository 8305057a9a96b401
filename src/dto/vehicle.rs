use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::validate_not_blank;
use crate::entities::vehicle::Model as Vehicle;

/// Vehicle creation input. Rejected before any persistence call when invalid.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub owner_id: Uuid,
    #[validate(length(max = 20), custom = "validate_not_blank")]
    #[schema(example = "KA-01-AB-1234")]
    pub license_plate: String,
    #[validate(length(max = 50), custom = "validate_not_blank")]
    #[schema(example = "van")]
    pub vehicle_type: String,
    /// Payload capacity in kilograms
    #[validate(range(min = 0.0))]
    pub capacity: Option<f64>,
    /// Cargo volume in cubic metres
    #[validate(range(min = 0.0))]
    pub volume: Option<f64>,
}

impl CreateVehicleRequest {
    /// Plates are compared and stored upper-cased without surrounding whitespace
    pub fn normalized_plate(&self) -> String {
        self.license_plate.trim().to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub license_plate: String,
    pub vehicle_type: String,
    pub capacity: Option<f64>,
    pub volume: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(model: Vehicle) -> Self {
        Self {
            id: model.id,
            owner_id: model.owner_id,
            license_plate: model.license_plate,
            vehicle_type: model.vehicle_type,
            capacity: model.capacity_kg,
            volume: model.volume_m3,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub owner_id: Option<Uuid>,
}
