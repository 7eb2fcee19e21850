use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::announcement;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/classrooms/{classroom_id}/announcements
///
/// Active announcements, pinned first, then newest. Members only.
pub async fn list(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    match announcement::Model::active_for_classroom(app_state.db(), classroom_id).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Announcements retrieved")),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to list announcements"),
    }
}

/// GET /api/classrooms/{classroom_id}/announcements/{announcement_id}
pub async fn detail(
    State(app_state): State<AppState>,
    Path((classroom_id, announcement_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match announcement::Model::find_active(app_state.db(), classroom_id, announcement_id).await {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(row, "Announcement retrieved")),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Announcement not found"),
        Err(e) => db_error(e, "Failed to load announcement"),
    }
}
