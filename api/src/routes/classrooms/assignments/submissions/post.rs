use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::submission::{self, SubmissionError};
use serde::Deserialize;
use validator::Validate;

use super::super::super::common::{db_error, error_response, resolve_student_profile};
use super::super::common::load_assignment;
use super::common::SubmissionResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, max = 2048, message = "Link must be 1-2048 characters"))]
    pub link: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    pub score: i32,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkGradeRequest {
    #[validate(length(min = 1, message = "At least one submission ID is required"))]
    pub submission_ids: Vec<i64>,
    pub score: i32,
    pub feedback: Option<String>,
}

fn submission_error(e: SubmissionError, context: &str) -> axum::response::Response {
    match e {
        SubmissionError::ResubmitAfterDue => error_response(
            StatusCode::CONFLICT,
            "Submission already exists and the due date has passed",
        ),
        SubmissionError::ScoreOutOfBounds { max_points } => error_response(
            StatusCode::BAD_REQUEST,
            &format!("Score must be between 0 and {max_points}"),
        ),
        SubmissionError::NotFound => error_response(StatusCode::NOT_FOUND, "Submission not found"),
        SubmissionError::Db(e) => db_error(e, context),
    }
}

/// POST /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions
///
/// Submits work. A first submission lands at any time, late ones tagged
/// in the response; a resubmission overwrites the earlier row (clearing
/// any grade) while the due date has not passed, and answers 409 after.
pub async fn submit(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
    AuthUser(claims): AuthUser,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    let profile = match resolve_student_profile(&app_state, claims.sub).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let now = Utc::now();
    match submission::Model::submit(app_state.db(), &assignment, profile.id, &req.link, now).await {
        Ok(created) => {
            let response = SubmissionResponse::from_model(created, assignment.due_date);
            let message = if response.is_late {
                "Submission received (late)"
            } else {
                "Submission received"
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(response, message)),
            )
                .into_response()
        }
        Err(e) => submission_error(e, "Failed to submit"),
    }
}

/// POST /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/{submission_id}/grade
///
/// Grades a single submission, owner only. The score must lie within
/// `0..=max_points` of the assignment.
pub async fn grade(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id, submission_id)): Path<(i64, i64, i64)>,
    Json(req): Json<GradeRequest>,
) -> impl IntoResponse {
    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    let target = match submission::Model::find_active_by_id(app_state.db(), submission_id).await {
        Ok(Some(s)) if s.assignment_id == assignment.id => s,
        Ok(_) => return error_response(StatusCode::NOT_FOUND, "Submission not found"),
        Err(e) => return db_error(e, "Failed to load submission"),
    };

    match target
        .grade(app_state.db(), &assignment, req.score, req.feedback.clone())
        .await
    {
        Ok(graded) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from_model(graded, assignment.due_date),
                "Submission graded successfully",
            )),
        )
            .into_response(),
        Err(e) => submission_error(e, "Failed to grade submission"),
    }
}

/// POST /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/bulk-grade
///
/// Applies one score/feedback pair to many submissions in a single
/// transaction. IDs that do not resolve to a live submission of this
/// assignment are reported back instead of failing the batch.
pub async fn bulk_grade(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
    Json(req): Json<BulkGradeRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    match submission::Model::bulk_grade(
        app_state.db(),
        &assignment,
        &req.submission_ids,
        req.score,
        req.feedback.clone(),
    )
    .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::success(outcome, "Bulk grade applied")),
        )
            .into_response(),
        Err(e) => submission_error(e, "Failed to bulk grade"),
    }
}
