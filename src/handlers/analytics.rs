use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    dto::analytics::{
        AnalyticsOverview, BackorderPrediction, CorrelationAnalysis, FeatureImportance,
        IngestBackorderRecordsRequest, IngestBackorderRecordsResponse,
    },
    errors::ServiceError,
    ApiResponse, ApiResult, AppState,
};

/// Build the analytics Router scoped under `/api/v1/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/backorder-records", post(ingest_backorder_records))
        .route("/overview", get(get_overview))
        .route("/predictions", get(get_predictions))
        .route("/correlation", get(get_correlation))
        .route("/feature-importance", get(get_feature_importance))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OverviewQuery {
    /// Include per-group averages (default: true)
    pub detailed: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PredictionsQuery {
    /// Maximum rows returned
    #[param(minimum = 1, maximum = 1000)]
    pub limit: Option<u64>,
    /// Drop rows below this probability
    #[param(minimum = 0.0, maximum = 1.0)]
    pub min_probability: Option<f64>,
}

/// Ingest a batch of backorder records, replacing rows with the same SKU
#[utoipa::path(
    post,
    path = "/api/v1/analytics/backorder-records",
    request_body = IngestBackorderRecordsRequest,
    responses(
        (status = 201, description = "Records stored", body = ApiResponse<IngestBackorderRecordsResponse>),
        (status = 400, description = "Empty, oversized or invalid batch", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn ingest_backorder_records(
    State(state): State<AppState>,
    Json(request): Json<IngestBackorderRecordsRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let stored = state
        .services
        .analytics
        .ingest_records(request.records)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(IngestBackorderRecordsResponse { stored })),
    ))
}

/// Backorder counts, rate and group averages
#[utoipa::path(
    get,
    path = "/api/v1/analytics/overview",
    params(OverviewQuery),
    responses(
        (status = 200, description = "Overview computed", body = ApiResponse<AnalyticsOverview>)
    ),
    tag = "Analytics"
)]
pub async fn get_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewQuery>,
) -> ApiResult<AnalyticsOverview> {
    let overview = state
        .services
        .analytics
        .overview(params.detailed.unwrap_or(true))
        .await?;
    Ok(Json(ApiResponse::success(overview)))
}

/// SKUs ranked by backorder probability
#[utoipa::path(
    get,
    path = "/api/v1/analytics/predictions",
    params(PredictionsQuery),
    responses(
        (status = 200, description = "Predictions retrieved", body = ApiResponse<Vec<BackorderPrediction>>),
        (status = 400, description = "Invalid limit or probability", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_predictions(
    State(state): State<AppState>,
    Query(params): Query<PredictionsQuery>,
) -> ApiResult<Vec<BackorderPrediction>> {
    let limit = params
        .limit
        .unwrap_or(state.config.analytics_default_prediction_limit);
    if limit == 0 || limit > 1000 {
        return Err(ServiceError::ValidationError(
            "limit must be between 1 and 1000".to_string(),
        ));
    }

    let predictions = state
        .services
        .analytics
        .predictions(limit, params.min_probability)
        .await?;
    Ok(Json(ApiResponse::success(predictions)))
}

/// Stock versus forecast correlation and category distributions
#[utoipa::path(
    get,
    path = "/api/v1/analytics/correlation",
    responses(
        (status = 200, description = "Correlation computed", body = ApiResponse<CorrelationAnalysis>)
    ),
    tag = "Analytics"
)]
pub async fn get_correlation(State(state): State<AppState>) -> ApiResult<CorrelationAnalysis> {
    let analysis = state
        .services
        .analytics
        .correlation(state.config.analytics_correlation_sample_size)
        .await?;
    Ok(Json(ApiResponse::success(analysis)))
}

/// Feature ranking against the backorder label
#[utoipa::path(
    get,
    path = "/api/v1/analytics/feature-importance",
    responses(
        (status = 200, description = "Feature importance computed", body = ApiResponse<Vec<FeatureImportance>>)
    ),
    tag = "Analytics"
)]
pub async fn get_feature_importance(
    State(state): State<AppState>,
) -> ApiResult<Vec<FeatureImportance>> {
    let features = state.services.analytics.feature_importance().await?;
    Ok(Json(ApiResponse::success(features)))
}
