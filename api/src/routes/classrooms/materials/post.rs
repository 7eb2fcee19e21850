use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::material;
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaterialRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub material_type: Option<String>,
    pub file_path: Option<String>,
    pub description: Option<String>,
}

/// POST /api/classrooms/{classroom_id}/materials
///
/// Attaches a material to the classroom, owner only. `file_path` is an
/// opaque reference; nothing is uploaded through this API.
pub async fn create(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
    Json(req): Json<CreateMaterialRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    match material::Model::create(
        app_state.db(),
        classroom_id,
        &req.title,
        req.material_type.clone(),
        req.file_path.clone(),
        req.description.clone(),
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                created,
                "Material created successfully",
            )),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to create material"),
    }
}
