use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{CreateDeliveryProofRequest, DeliveryProofResponse, SimplifiedDeliveryProofResponse},
    errors::ServiceError,
    ApiResponse, ApiResult, AppState,
};

/// Attach a delivery proof to an order
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/delivery-proofs",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = CreateDeliveryProofRequest,
    responses(
        (status = 201, description = "Proof captured", body = ApiResponse<DeliveryProofResponse>),
        (status = 400, description = "Invalid proof or cancelled order", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Delivery Proofs"
)]
pub async fn create_delivery_proof(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<CreateDeliveryProofRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    request.validate()?;
    let proof = state
        .services
        .delivery_proofs
        .capture(order_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(proof))))
}

/// Delivery proofs for an order, newest first
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/delivery-proofs",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Proofs retrieved", body = ApiResponse<Vec<SimplifiedDeliveryProofResponse>>),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Delivery Proofs"
)]
pub async fn list_delivery_proofs(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<Vec<SimplifiedDeliveryProofResponse>> {
    let proofs = state
        .services
        .delivery_proofs
        .list_for_order(order_id)
        .await?;
    Ok(Json(ApiResponse::success(proofs)))
}
