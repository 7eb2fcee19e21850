use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use common::format_validation_errors;
use db::models::classroom;
use serde::Deserialize;
use validator::Validate;

use super::common::{ClassroomResponse, db_error, error_response, resolve_teacher_profile};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassroomRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub subject_area: Option<String>,
}

/// POST /api/classrooms
///
/// Creates a classroom owned by the calling teacher.
pub async fn create(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateClassroomRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        if end < start {
            return error_response(
                StatusCode::BAD_REQUEST,
                "End date must not precede start date",
            );
        }
    }

    let profile = match resolve_teacher_profile(&app_state, claims.sub).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    match classroom::Model::create(
        app_state.db(),
        profile.id,
        &req.title,
        req.description.clone(),
        req.start_date,
        req.end_date,
        req.subject_area.clone(),
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                ClassroomResponse::from(created),
                "Classroom created successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to create classroom"),
    }
}
