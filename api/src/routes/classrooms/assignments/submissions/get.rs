use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::Role;
use db::models::{student, submission, user};
use sea_orm::EntityTrait;
use serde::Serialize;

use super::super::super::common::{db_error, error_response, resolve_student_profile};
use super::super::common::load_assignment;
use super::common::SubmissionResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SubmissionListEntry {
    #[serde(flatten)]
    pub submission: SubmissionResponse,
    pub student_name: Option<String>,
}

/// GET /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions
///
/// All live submissions for the assignment, newest first, owner only.
pub async fn list(
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
            Err(e) => return db_error(e, "Failed to list submissions"),
        };

    let mut data = Vec::with_capacity(submissions.len());
    for row in submissions {
        let student_name = match student::Entity::find_by_id(row.student_id)
            .one(app_state.db())
            .await
        {
            Ok(Some(profile)) => {
                match user::Model::find_active_by_id(app_state.db(), profile.user_id).await {
                    Ok(account) => account.map(|a| a.name),
                    Err(e) => return db_error(e, "Failed to list submissions"),
                }
            }
            Ok(None) => None,
            Err(e) => return db_error(e, "Failed to list submissions"),
        };

        data.push(SubmissionListEntry {
            submission: SubmissionResponse::from_model(row, assignment.due_date),
            student_name,
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(data, "Submissions retrieved")),
    )
        .into_response()
}

/// GET /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/my
///
/// The calling student's own submission, if any.
pub async fn my_submission(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
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

    match submission::Model::find_active_for_student(app_state.db(), assignment.id, profile.id)
        .await
    {
        Ok(Some(row)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from_model(row, assignment.due_date),
                "Submission retrieved",
            )),
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Submission not found"),
        Err(e) => db_error(e, "Failed to load submission"),
    }
}

/// GET /api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/{submission_id}
///
/// Single submission. The owner sees any; a student sees only their
/// own, and anything else answers the same 404 as a missing row.
pub async fn detail(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id, submission_id)): Path<(i64, i64, i64)>,
    AuthUser(claims): AuthUser,
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

    if claims.role == Role::Student {
        let profile = match resolve_student_profile(&app_state, claims.sub).await {
            Ok(profile) => profile,
            Err(resp) => return resp,
        };
        if target.student_id != profile.id {
            return error_response(StatusCode::NOT_FOUND, "Submission not found");
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SubmissionResponse::from_model(target, assignment.due_date),
            "Submission retrieved",
        )),
    )
        .into_response()
}
