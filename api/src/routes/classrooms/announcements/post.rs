use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::announcement;
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
}

/// POST /api/classrooms/{classroom_id}/announcements
///
/// Posts an announcement to the classroom, owner only.
pub async fn create(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    match announcement::Model::create(
        app_state.db(),
        classroom_id,
        &req.title,
        &req.content,
        req.pinned,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                created,
                "Announcement created successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to create announcement"),
    }
}
