use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::SubmissionStatus;
use db::models::{assignment, enrollment, submission};

use super::super::common::db_error;
use super::common::{AssignmentResponse, AssignmentWithProgress, load_assignment, percent};
use crate::response::ApiResponse;
use crate::state::AppState;

async fn with_progress(
    app_state: &AppState,
    assignment: assignment::Model,
    enrolled: u64,
) -> Result<AssignmentWithProgress, sea_orm::DbErr> {
    let submissions =
        submission::Model::active_for_assignment(app_state.db(), assignment.id).await?;
    let submission_count = submissions.len() as u64;
    let graded_count = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Graded)
        .count() as u64;

    Ok(AssignmentWithProgress {
        assignment: AssignmentResponse::from(assignment),
        submission_count,
        graded_count,
        completion_percent: percent(submission_count, enrolled),
        graded_percent: percent(graded_count, submission_count),
    })
}

/// GET /api/classrooms/{classroom_id}/assignments
///
/// Active assignments of the classroom with progress counters, most
/// recently due first. Members only.
pub async fn list(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    let assignments =
        match assignment::Model::active_for_classroom(app_state.db(), classroom_id).await {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to list assignments"),
        };

    let enrolled =
        match enrollment::Model::active_count_for_classroom(app_state.db(), classroom_id).await {
            Ok(count) => count,
            Err(e) => return db_error(e, "Failed to count enrollments"),
        };

    let mut data = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        match with_progress(&app_state, assignment, enrolled).await {
            Ok(item) => data.push(item),
            Err(e) => return db_error(e, "Failed to list assignments"),
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(data, "Assignments retrieved")),
    )
        .into_response()
}

/// GET /api/classrooms/{classroom_id}/assignments/{assignment_id}
pub async fn detail(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    let enrolled =
        match enrollment::Model::active_count_for_classroom(app_state.db(), classroom_id).await {
            Ok(count) => count,
            Err(e) => return db_error(e, "Failed to count enrollments"),
        };

    match with_progress(&app_state, assignment, enrolled).await {
        Ok(item) => (
            StatusCode::OK,
            Json(ApiResponse::success(item, "Assignment retrieved")),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to load assignment"),
    }
}
