use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::validate_not_blank;
use crate::entities::order::{Model as Order, OrderStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub owner_id: Uuid,
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub customer_name: String,
    #[validate(length(max = 500), custom = "validate_not_blank")]
    pub delivery_address: String,
    /// Must reference an existing vehicle
    pub vehicle_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub owner_id: Uuid,
    pub customer_name: String,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub vehicle_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(model: Order) -> Self {
        Self {
            id: model.id,
            order_number: model.order_number,
            owner_id: model.owner_id,
            customer_name: model.customer_name,
            delivery_address: model.delivery_address,
            status: model.status,
            vehicle_id: model.vehicle_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub owner_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
}
