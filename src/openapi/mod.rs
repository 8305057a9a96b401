use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Logistics API",
        version = "1.0.0",
        description = r#"
# Logistics API

Backend for a delivery and e-commerce onboarding flow.

## Features

- **Products**: Catalog entries with a tolerant lifecycle status
- **Vehicles**: Fleet registration with validated plates
- **Orders**: Order lifecycle and delivery proofs
- **Checklist**: Onboarding progress per user
- **Analytics**: Backorder risk, correlation and feature ranking

## Error Handling

Errors share one response shape:

```json
{
  "error": "Bad Request",
  "message": "Validation error: licensePlate: must not be blank",
  "requestId": "req-abc123xyz",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

## Pagination

List endpoints accept `page` (default 1) and `limit` (clamped to the configured maximum).
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Vehicles", description = "Fleet registration endpoints"),
        (name = "Orders", description = "Order management endpoints"),
        (name = "Delivery Proofs", description = "Proof of delivery endpoints"),
        (name = "Checklist", description = "Onboarding checklist endpoints"),
        (name = "Analytics", description = "Backorder analytics endpoints")
    ),
    paths(
        // Products
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product_status,

        // Vehicles
        crate::handlers::vehicles::create_vehicle,
        crate::handlers::vehicles::list_vehicles,
        crate::handlers::vehicles::get_vehicle,

        // Orders
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order_status,

        // Delivery proofs
        crate::handlers::delivery_proofs::create_delivery_proof,
        crate::handlers::delivery_proofs::list_delivery_proofs,

        // Checklist
        crate::handlers::checklist::get_checklist,

        // Analytics
        crate::handlers::analytics::ingest_backorder_records,
        crate::handlers::analytics::get_overview,
        crate::handlers::analytics::get_predictions,
        crate::handlers::analytics::get_correlation,
        crate::handlers::analytics::get_feature_importance,
    ),
    components(
        schemas(
            // Product types
            crate::dto::CreateProductRequest,
            crate::dto::UpdateProductStatusRequest,
            crate::dto::ProductResponse,
            crate::entities::ProductStatus,

            // Vehicle types
            crate::dto::CreateVehicleRequest,
            crate::dto::VehicleResponse,

            // Order types
            crate::dto::CreateOrderRequest,
            crate::dto::UpdateOrderStatusRequest,
            crate::dto::OrderResponse,
            crate::entities::order::OrderStatus,

            // Delivery proof types
            crate::dto::CreateDeliveryProofRequest,
            crate::dto::DeliveryProofResponse,
            crate::dto::SimplifiedDeliveryProofResponse,
            crate::entities::delivery_proof::DeliveryProofType,

            // Checklist types
            crate::dto::ChecklistProgressResponse,
            crate::dto::ChecklistStepResponse,
            crate::dto::ChecklistStepCode,

            // Analytics types
            crate::dto::analytics::BackorderRecordInput,
            crate::dto::analytics::IngestBackorderRecordsRequest,
            crate::dto::analytics::IngestBackorderRecordsResponse,
            crate::dto::AnalyticsOverview,
            crate::dto::BackorderPrediction,
            crate::dto::CorrelationAnalysis,
            crate::dto::CorrelationPoint,
            crate::dto::CategoryDistribution,
            crate::dto::FeatureImportance,
            crate::dto::Priority,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url(OPENAPI_JSON_PATH, ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from(OPENAPI_JSON_PATH).try_it_out_enabled(true))
}
