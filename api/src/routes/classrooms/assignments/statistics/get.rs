use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::submission::{self, SubmissionStatus};
use db::models::enrollment;
use serde::Serialize;

use super::super::super::common::db_error;
use super::super::common::{load_assignment, percent};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct AssignmentStatistics {
    pub total_submissions: u64,
    pub graded_submissions: u64,
    pub late_submissions: u64,
    /// Mean of graded scores, 0 until something is graded.
    pub average_grade: f64,
    pub completion_percent: f64,
    pub graded_percent: f64,
}

/// GET /api/classrooms/{classroom_id}/assignments/{assignment_id}/statistics
///
/// Owner-only aggregation over the assignment's live submissions.
/// Lateness is computed against the assignment's current due date, so
/// the numbers follow due-date edits. Withdrawn submissions are
/// excluded; work from since-dropped students still counts.
pub async fn statistics(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    let submissions =
        match submission::Model::active_for_assignment(app_state.db(), assignment.id).await {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to load submissions"),
        };

    let enrolled =
        match enrollment::Model::active_count_for_classroom(app_state.db(), classroom_id).await {
            Ok(count) => count,
            Err(e) => return db_error(e, "Failed to count enrollments"),
        };

    let total = submissions.len() as u64;
    let graded: Vec<i32> = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Graded)
        .filter_map(|s| s.score)
        .collect();
    let late = submissions
        .iter()
        .filter(|s| submission::is_late(s.submitted_at, assignment.due_date))
        .count() as u64;

    let average_grade = if graded.is_empty() {
        0.0
    } else {
        let sum: i64 = graded.iter().map(|&s| s as i64).sum();
        ((sum as f64 / graded.len() as f64) * 10.0).round() / 10.0
    };

    let stats = AssignmentStatistics {
        total_submissions: total,
        graded_submissions: graded.len() as u64,
        late_submissions: late,
        average_grade,
        completion_percent: percent(total, enrolled),
        graded_percent: percent(graded.len() as u64, total),
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(stats, "Statistics retrieved")),
    )
        .into_response()
}
