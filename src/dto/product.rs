use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::validate_not_blank;
use crate::entities::product::Model as Product;
use crate::entities::ProductStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub owner_id: Uuid,
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub sku: String,
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Defaults to `ACTIVE`
    pub status: Option<ProductStatus>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductStatusRequest {
    pub status: ProductStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub status: Option<ProductStatus>,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(model: Product) -> Self {
        Self {
            status: model.product_status(),
            id: model.id,
            owner_id: model.owner_id,
            sku: model.sku,
            name: model.name,
            category: model.category,
            stock_quantity: model.stock_quantity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub owner_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(status: Option<i32>) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            sku: "SKU-1".into(),
            name: "Pallet wrap".into(),
            category: None,
            status,
            stock_quantity: 4,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn whitespace_only_sku_and_name_are_rejected() {
        let request = CreateProductRequest {
            owner_id: Uuid::new_v4(),
            sku: "  ".into(),
            name: " ".into(),
            category: None,
            status: None,
            stock_quantity: 0,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["sku"][0].code, "blank");
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn unknown_stored_code_is_reported_as_active() {
        let response = ProductResponse::from(model(Some(42)));
        assert_eq!(response.status, Some(ProductStatus::Active));
    }

    #[test]
    fn null_stored_code_stays_null() {
        let value = serde_json::to_value(ProductResponse::from(model(None))).unwrap();
        assert_eq!(value["status"], serde_json::Value::Null);
        assert_eq!(value["stockQuantity"], 4);
    }

    #[test]
    fn create_request_rejects_negative_stock() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "ownerId": Uuid::new_v4(),
            "sku": "SKU-9",
            "name": "Crate",
            "stockQuantity": -1
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_reads_status_code_names() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "ownerId": Uuid::new_v4(),
            "sku": "SKU-9",
            "name": "Crate",
            "status": "OUT_OF_STOCK"
        }))
        .unwrap();
        assert_eq!(request.status, Some(ProductStatus::OutOfStock));
        assert_eq!(request.stock_quantity, 0);
    }
}
