use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission;

use super::super::super::common::{db_error, error_response, resolve_student_profile};
use super::super::common::load_assignment;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// DELETE /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/{submission_id}
///
/// Withdraws the calling student's own submission (soft delete). A later
/// resubmission reactivates and overwrites the same row.
pub async fn withdraw(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id, submission_id)): Path<(i64, i64, i64)>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    let profile = match resolve_student_profile(&app_state, claims.sub).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let target = match submission::Model::find_active_by_id(app_state.db(), submission_id).await {
        Ok(Some(s)) if s.assignment_id == assignment.id && s.student_id == profile.id => s,
        Ok(_) => return error_response(StatusCode::NOT_FOUND, "Submission not found"),
        Err(e) => return db_error(e, "Failed to load submission"),
    };

    match target.withdraw(app_state.db()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Submission withdrawn")),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to withdraw submission"),
    }
}
