use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use db::models::enrollment::EnrollmentStatus;
use db::models::{enrollment, student, user};
use sea_orm::EntityTrait;
use serde::Serialize;

use super::super::common::db_error;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RosterEntry {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub grade_level: Option<String>,
    pub enrollment_year: Option<i32>,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

/// GET /api/classrooms/{classroom_id}/enrollments
///
/// Roster of actively enrolled students, owner only. Dropped rows never
/// appear.
pub async fn roster(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    let enrollments =
        match enrollment::Model::active_for_classroom(app_state.db(), classroom_id).await {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to load roster"),
        };

    let mut roster = Vec::with_capacity(enrollments.len());
    for row in enrollments {
        let profile = match student::Entity::find_by_id(row.student_id)
            .one(app_state.db())
            .await
        {
            Ok(Some(profile)) => profile,
            Ok(None) => continue,
            Err(e) => return db_error(e, "Failed to load roster"),
        };

        let account = match user::Model::find_active_by_id(app_state.db(), profile.user_id).await {
            Ok(Some(account)) => account,
            Ok(None) => continue,
            Err(e) => return db_error(e, "Failed to load roster"),
        };

        roster.push(RosterEntry {
            enrollment_id: row.id,
            student_id: profile.id,
            name: account.name,
            email: account.email,
            grade_level: profile.grade_level,
            enrollment_year: profile.enrollment_year,
            enrollment_date: row.enrollment_date,
            status: row.status,
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(roster, "Roster retrieved")),
    )
        .into_response()
}
