use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::material;
use sea_orm::{ActiveModelTrait, Set};
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaterialRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub material_type: Option<String>,
    pub file_path: Option<String>,
    pub description: Option<String>,
}

/// PUT /api/classrooms/{classroom_id}/materials/{material_id}
///
/// Partial update, owner only.
pub async fn edit(
    State(app_state): State<AppState>,
    Path((classroom_id, material_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateMaterialRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let existing =
        match material::Model::find_active(app_state.db(), classroom_id, material_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return error_response(StatusCode::NOT_FOUND, "Material not found"),
            Err(e) => return db_error(e, "Failed to load material"),
        };

    let mut row: material::ActiveModel = existing.into();
    if let Some(title) = req.title {
        row.title = Set(title);
    }
    if let Some(material_type) = req.material_type {
        row.material_type = Set(Some(material_type));
    }
    if let Some(file_path) = req.file_path {
        row.file_path = Set(Some(file_path));
    }
    if let Some(description) = req.description {
        row.description = Set(Some(description));
    }
    row.updated_at = Set(Utc::now());

    match row.update(app_state.db()).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                updated,
                "Material updated successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to update material"),
    }
}
