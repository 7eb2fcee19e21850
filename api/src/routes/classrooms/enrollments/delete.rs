use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::enrollment;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

/// DELETE /api/classrooms/{classroom_id}/enrollments/{student_id}
///
/// Drops a student from the classroom, owner only. The enrollment row
/// flips to `dropped` and stops counting toward class size; the
/// student's submissions stay untouched.
pub async fn drop_student(
    State(app_state): State<AppState>,
    Path((classroom_id, student_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match enrollment::Model::drop_student(app_state.db(), student_id, classroom_id).await {
        Ok(Some(_)) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Student dropped successfully")),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Enrollment not found"),
        Err(e) => db_error(e, "Failed to drop student"),
    }
}
