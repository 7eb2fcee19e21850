use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Role;
use serde::Deserialize;

use super::super::classrooms::common::{
    db_error, error_response, resolve_student_profile, resolve_teacher_profile,
};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// Teacher field.
    pub department: Option<String>,
    /// Student fields.
    pub grade_level: Option<String>,
    pub enrollment_year: Option<i32>,
}

/// PUT /api/me/profile
///
/// Updates the caller's role profile. Absent fields keep their stored
/// values; fields belonging to the other role are ignored.
pub async fn profile(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    match claims.role {
        Role::Teacher => {
            let profile = match resolve_teacher_profile(&app_state, claims.sub).await {
                Ok(profile) => profile,
                Err(resp) => return resp,
            };
            let department = req.department.or_else(|| profile.department.clone());
            match profile.update_department(app_state.db(), department).await {
                Ok(updated) => (
                    StatusCode::OK,
                    Json(ApiResponse::success(updated, "Profile updated successfully")),
                )
                    .into_response(),
                Err(e) => db_error(e, "Failed to update profile"),
            }
        }
        Role::Student => {
            let profile = match resolve_student_profile(&app_state, claims.sub).await {
                Ok(profile) => profile,
                Err(resp) => return resp,
            };
            match profile
                .update_profile(app_state.db(), req.grade_level, req.enrollment_year)
                .await
            {
                Ok(updated) => (
                    StatusCode::OK,
                    Json(ApiResponse::success(updated, "Profile updated successfully")),
                )
                    .into_response(),
                Err(e) => db_error(e, "Failed to update profile"),
            }
        }
        _ => error_response(StatusCode::FORBIDDEN, "No profile for this role"),
    }
}
