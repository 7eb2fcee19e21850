use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::material;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/classrooms/{classroom_id}/materials
///
/// Active materials of the classroom, newest upload first. Members only.
pub async fn list(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    match material::Model::active_for_classroom(app_state.db(), classroom_id).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Materials retrieved")),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to list materials"),
    }
}

/// GET /api/classrooms/{classroom_id}/materials/{material_id}
pub async fn detail(
    State(app_state): State<AppState>,
    Path((classroom_id, material_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match material::Model::find_active(app_state.db(), classroom_id, material_id).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(row, "Material retrieved")),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Material not found"),
        Err(e) => db_error(e, "Failed to load material"),
    }
}
