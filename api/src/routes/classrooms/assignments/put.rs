use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::assignment;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response};
use super::common::{AssignmentResponse, load_assignment};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Max points must be positive"))]
    pub max_points: Option<i32>,
}

/// PUT /api/classrooms/{classroom_id}/assignments/{assignment_id}
///
/// Partial update, owner only. Moving the due date re-labels existing
/// submissions as late or on time on the next read, because lateness is
/// always derived from the current due date.
pub async fn edit(
    State(app_state): State<AppState>,
    Path((classroom_id, assignment_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let assignment = match load_assignment(&app_state, classroom_id, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return resp,
    };

    let mut row: assignment::ActiveModel = assignment.into();
    if let Some(title) = req.title {
        row.title = Set(title);
    }
    if let Some(description) = req.description {
        row.description = Set(Some(description));
    }
    if let Some(due_date) = req.due_date {
        row.due_date = Set(due_date);
    }
    if let Some(max_points) = req.max_points {
        row.max_points = Set(max_points);
    }
    row.updated_at = Set(Utc::now());

    match row.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AssignmentResponse::from(updated),
                "Assignment updated successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to update assignment"),
    }
}
