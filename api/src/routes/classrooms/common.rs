//! Shared response shapes and helpers for classroom routes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use db::models::{classroom, student, teacher};
use sea_orm::DbErr;
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ClassroomResponse {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub subject_area: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<classroom::Model> for ClassroomResponse {
    fn from(classroom: classroom::Model) -> Self {
        Self {
            id: classroom.id,
            teacher_id: classroom.teacher_id,
            title: classroom.title,
            description: classroom.description,
            start_date: classroom.start_date,
            end_date: classroom.end_date,
            subject_area: classroom.subject_area,
            created_at: classroom.created_at,
            updated_at: classroom.updated_at,
        }
    }
}

/// Detail view adds the live class size (active enrollments only).
#[derive(Serialize)]
pub struct ClassroomDetailResponse {
    #[serde(flatten)]
    pub classroom: ClassroomResponse,
    pub class_size: u64,
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

pub fn db_error(e: DbErr, message: &str) -> Response {
    tracing::error!("{message}: {e}");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Resolves the calling teacher's profile, or a 403 if the account has
/// none. Guards keep non-teachers out; a missing profile here means the
/// account is broken.
pub async fn resolve_teacher_profile(
    app_state: &AppState,
    user_id: i64,
) -> Result<teacher::Model, Response> {
    match teacher::Model::find_by_user_id(app_state.db(), user_id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(error_response(
            StatusCode::FORBIDDEN,
            "Teacher profile not found",
        )),
        Err(e) => Err(db_error(e, "Failed to resolve teacher profile")),
    }
}

/// Resolves the calling student's profile, or a 403 if the account has
/// none.
pub async fn resolve_student_profile(
    app_state: &AppState,
    user_id: i64,
) -> Result<student::Model, Response> {
    match student::Model::find_by_user_id(app_state.db(), user_id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(error_response(
            StatusCode::FORBIDDEN,
            "Student profile not found",
        )),
        Err(e) => Err(db_error(e, "Failed to resolve student profile")),
    }
}

/// Loads an active classroom or answers 404. Handlers behind an
/// ownership or membership guard still re-fetch through this, so a
/// delete racing the guard cannot resurrect the row.
pub async fn load_classroom(
    app_state: &AppState,
    classroom_id: i64,
) -> Result<classroom::Model, Response> {
    match classroom::Model::find_active(app_state.db(), classroom_id).await {
        Ok(Some(classroom)) => Ok(classroom),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Classroom not found")),
        Err(e) => Err(db_error(e, "Failed to load classroom")),
    }
}
