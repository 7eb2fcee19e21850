use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use common::format_validation_errors;
use db::models::classroom;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use validator::Validate;

use super::common::{ClassroomResponse, db_error, error_response, load_classroom};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClassroomRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub subject_area: Option<String>,
}

/// PUT /api/classrooms/{classroom_id}
///
/// Partial update: absent fields keep their stored values. Ownership is
/// enforced by the route guard.
pub async fn edit(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
    Json(req): Json<UpdateClassroomRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let classroom = match load_classroom(&app_state, classroom_id).await {
        Ok(classroom) => classroom,
        Err(resp) => return resp,
    };

    let start = req.start_date.or(classroom.start_date);
    let end = req.end_date.or(classroom.end_date);
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return error_response(
                StatusCode::BAD_REQUEST,
                "End date must not precede start date",
            );
        }
    }

    let mut row: classroom::ActiveModel = classroom.into();
    if let Some(title) = req.title {
        row.title = Set(title);
    }
    if let Some(description) = req.description {
        row.description = Set(Some(description));
    }
    if let Some(start_date) = req.start_date {
        row.start_date = Set(Some(start_date));
    }
    if let Some(end_date) = req.end_date {
        row.end_date = Set(Some(end_date));
    }
    if let Some(subject_area) = req.subject_area {
        row.subject_area = Set(Some(subject_area));
    }
    row.updated_at = Set(Utc::now());

    match row.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ClassroomResponse::from(updated),
                "Classroom updated successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to update classroom"),
    }
}
