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

/// DELETE /api/classrooms/{classroom_id}/announcements/{announcement_id}
///
/// Soft delete, owner only.
pub async fn remove(
    State(app_state): State<AppState>,
    Path((classroom_id, announcement_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let existing =
        match announcement::Model::find_active(app_state.db(), classroom_id, announcement_id).await
        {
            Ok(Some(row)) => row,
            Ok(None) => return error_response(StatusCode::NOT_FOUND, "Announcement not found"),
            Err(e) => return db_error(e, "Failed to load announcement"),
        };

    match existing.soft_delete(app_state.db()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                (),
                "Announcement deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to delete announcement"),
    }
}
