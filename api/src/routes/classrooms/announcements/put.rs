use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::announcement;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAnnouncementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,
}

async fn load(
    app_state: &AppState,
    classroom_id: i64,
    announcement_id: i64,
) -> Result<announcement::Model, Response> {
    match announcement::Model::find_active(app_state.db(), classroom_id, announcement_id).await {
        Ok(Some(row)) => Ok(row),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            "Announcement not found",
        )),
        Err(e) => Err(db_error(e, "Failed to load announcement")),
    }
}

/// PUT /api/classrooms/{classroom_id}/announcements/{announcement_id}
///
/// Partial update of title and content, owner only.
pub async fn edit(
    State(app_state): State<AppState>,
    Path((classroom_id, announcement_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateAnnouncementRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let existing = match load(&app_state, classroom_id, announcement_id).await {
        Ok(row) => row,
        Err(resp) => return resp,
    };

    let mut row: announcement::ActiveModel = existing.into();
    if let Some(title) = req.title {
        row.title = Set(title);
    }
    if let Some(content) = req.content {
        row.content = Set(content);
    }
    row.updated_at = Set(Utc::now());

    match row.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                updated,
                "Announcement updated successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to update announcement"),
    }
}

/// PUT /api/classrooms/{classroom_id}/announcements/{announcement_id}/pin
pub async fn pin(
    State(app_state): State<AppState>,
    Path((classroom_id, announcement_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    set_pinned(app_state, classroom_id, announcement_id, true).await
}

/// PUT /api/classrooms/{classroom_id}/announcements/{announcement_id}/unpin
pub async fn unpin(
    State(app_state): State<AppState>,
    Path((classroom_id, announcement_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    set_pinned(app_state, classroom_id, announcement_id, false).await
}

async fn set_pinned(
    app_state: AppState,
    classroom_id: i64,
    announcement_id: i64,
    pinned: bool,
) -> Response {
    let existing = match load(&app_state, classroom_id, announcement_id).await {
        Ok(row) => row,
        Err(resp) => return resp,
    };

    match existing.set_pinned(app_state.db(), pinned).await {
        Ok(updated) => {
            let message = if pinned {
                "Announcement pinned"
            } else {
                "Announcement unpinned"
            };
            (StatusCode::OK, Json(ApiResponse::success(updated, message))).into_response()
        }
        Err(e) => db_error(e, "Failed to update announcement"),
    }
}
