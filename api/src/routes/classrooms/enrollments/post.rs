use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::{enrollment, enrollment::EnrollmentError, teacher, user};
use sea_orm::EntityTrait;
use serde::Deserialize;
use validator::Validate;

use super::super::common::{db_error, error_response, load_classroom, resolve_student_profile};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    /// Name of the classroom's teacher, as a join confirmation.
    #[validate(length(min = 1, message = "Teacher name is required"))]
    pub teacher_name: String,
}

/// POST /api/classrooms/{classroom_id}/enrollments
///
/// Self-enrollment. The student must name the classroom's teacher
/// (case-insensitively) as a confirmation they were invited; a mismatch
/// is a 400, a duplicate active enrollment a 409. Re-enrolling after a
/// drop reactivates the old row.
pub async fn enroll(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
    AuthUser(claims): AuthUser,
    Json(req): Json<EnrollRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, &format_validation_errors(&e));
    }

    let classroom = match load_classroom(&app_state, classroom_id).await {
        Ok(classroom) => classroom,
        Err(resp) => return resp,
    };

    let owner_user = match teacher::Entity::find_by_id(classroom.teacher_id)
        .one(app_state.db())
        .await
    {
        Ok(Some(profile)) => {
            match user::Model::find_active_by_id(app_state.db(), profile.user_id).await {
                Ok(Some(owner)) => owner,
                Ok(None) => {
                    return error_response(StatusCode::NOT_FOUND, "Classroom not found");
                }
                Err(e) => return db_error(e, "Failed to resolve classroom teacher"),
            }
        }
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => return db_error(e, "Failed to resolve classroom teacher"),
    };

    if !owner_user
        .name
        .trim()
        .eq_ignore_ascii_case(req.teacher_name.trim())
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Teacher name does not match this classroom",
        );
    }

    let profile = match resolve_student_profile(&app_state, claims.sub).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    match enrollment::Model::enroll(app_state.db(), profile.id, classroom_id).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(created, "Enrolled successfully")),
        )
            .into_response(),
        Err(EnrollmentError::AlreadyEnrolled) => error_response(
            StatusCode::CONFLICT,
            "Student already enrolled in this classroom",
        ),
        Err(EnrollmentError::Db(e)) => db_error(e, "Failed to enroll"),
    }
}
