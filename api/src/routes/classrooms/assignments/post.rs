use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::assignment;
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response};
use super::common::AssignmentResponse;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[validate(range(min = 1, message = "Max points must be positive"))]
    pub max_points: i32,
}

/// POST /api/classrooms/{classroom_id}/assignments
///
/// Creates an assignment in the classroom, owner only. A due date in the
/// past is allowed; submissions against it are simply late.
pub async fn create(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
    Json(req): Json<CreateAssignmentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    match assignment::Model::create(
        app_state.db(),
        classroom_id,
        &req.title,
        req.description.clone(),
        req.due_date,
        req.max_points,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AssignmentResponse::from(created),
                "Assignment created successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to create assignment"),
    }
}
