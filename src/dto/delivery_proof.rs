use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validate_not_blank;
use crate::entities::delivery_proof::{DeliveryProofType, Model as DeliveryProof};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryProofRequest {
    pub proof_type: DeliveryProofType,
    #[validate(length(max = 1024), custom = "validate_not_blank")]
    pub file_path: String,
    #[validate(length(max = 255))]
    pub recipient_name: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    /// Defaults to the time the request is received
    pub captured_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryProofResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub proof_type: DeliveryProofType,
    pub file_path: String,
    pub recipient_name: Option<String>,
    pub notes: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<DeliveryProof> for DeliveryProofResponse {
    fn from(model: DeliveryProof) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            proof_type: model.proof_type,
            file_path: model.file_path,
            recipient_name: model.recipient_name,
            notes: model.notes,
            captured_at: model.captured_at,
            created_at: model.created_at,
        }
    }
}

/// Delivery-proof summary used in order timelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedDeliveryProofResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub proof_type: DeliveryProofType,
    pub file_path: String,
    pub recipient_name: Option<String>,
    pub captured_at: DateTime<Utc>,
}

impl From<DeliveryProof> for SimplifiedDeliveryProofResponse {
    fn from(model: DeliveryProof) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            proof_type: model.proof_type,
            file_path: model.file_path,
            recipient_name: model.recipient_name,
            captured_at: model.captured_at,
        }
    }
}
