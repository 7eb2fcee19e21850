use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::super::common::db_error;
use super::common::load_assignment;
use crate::response::ApiResponse;
use crate::state::AppState;

/// DELETE /api/classrooms/{classroom_id}/assignments/{assignment_id}
///
/// Soft delete, owner only. Submissions under the assignment become
/// unreachable but keep their rows.
pub async fn remove(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    match assignment.soft_delete(app_state.db()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Assignment deleted successfully")),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to delete assignment"),
    }
}
