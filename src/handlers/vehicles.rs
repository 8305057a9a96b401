use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::page_number,
    dto::{CreateVehicleRequest, VehicleListQuery, VehicleResponse},
    errors::ServiceError,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};

/// Build the vehicles Router scoped under `/api/v1/vehicles`.
pub fn vehicles_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle))
}

/// Register a vehicle
#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleResponse>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Blank or oversized fields, negative capacity or volume", body = crate::errors::ErrorResponse),
        (status = 409, description = "License plate already registered", body = crate::errors::ErrorResponse),
    ),
    tag = "Vehicles"
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    request.validate()?;
    let vehicle = state.services.vehicles.create_vehicle(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle))))
}

/// List vehicles
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    params(VehicleListQuery),
    responses(
        (status = 200, description = "Vehicles retrieved", body = ApiResponse<PaginatedResponse<VehicleResponse>>),
    ),
    tag = "Vehicles"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> ApiResult<PaginatedResponse<VehicleResponse>> {
    let page = page_number(query.page);
    let limit = state.config.page_size(query.limit);
    let (items, total) = state
        .services
        .vehicles
        .list_vehicles(query.owner_id, page, limit)
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, page, limit,
    ))))
}

/// Get a vehicle by id
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle retrieved", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Vehicle not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Vehicles"
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<VehicleResponse> {
    let vehicle = state.services.vehicles.get_vehicle(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}
