use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::{dto::ChecklistProgressResponse, ApiResponse, ApiResult, AppState};

/// Build the checklist Router scoped under `/api/v1/users`.
pub fn checklist_routes() -> Router<AppState> {
    Router::new().route("/:user_id/checklist", get(get_checklist))
}

/// Onboarding progress for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/checklist",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Checklist computed", body = ApiResponse<ChecklistProgressResponse>),
    ),
    tag = "Checklist"
)]
pub async fn get_checklist(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<ChecklistProgressResponse> {
    let progress = state.services.checklist.progress(user_id).await?;
    Ok(Json(ApiResponse::success(progress)))
}
