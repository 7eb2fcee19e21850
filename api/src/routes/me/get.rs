use std::collections::HashSet;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use db::models::enrollment::EnrollmentStatus;
use db::models::user::Role;
use db::models::{announcement, assignment, classroom, enrollment, material, teacher, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use super::super::classrooms::assignments::common::AssignmentResponse;
use super::super::classrooms::common::{
    ClassroomResponse, db_error, error_response, resolve_student_profile, resolve_teacher_profile,
};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const RECENT_ACTIVITY_LIMIT: usize = 10;

/// One row of the recent-activity feed. Assignments, materials and
/// announcements are folded into a single list, newest first.
#[derive(Serialize)]
pub struct ActivityItem {
    pub kind: &'static str,
    pub id: i64,
    pub classroom_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ClassroomSummary {
    #[serde(flatten)]
    pub classroom: ClassroomResponse,
    pub student_count: usize,
    pub assignment_count: usize,
}

#[derive(Serialize)]
pub struct TeacherDashboard {
    pub role: Role,
    pub classroom_count: usize,
    /// Distinct students; a student in two classrooms counts once.
    pub student_count: usize,
    pub assignment_count: usize,
    pub material_count: usize,
    pub announcement_count: usize,
    pub classrooms: Vec<ClassroomSummary>,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Serialize)]
pub struct ClassroomWithTeacher {
    #[serde(flatten)]
    pub classroom: ClassroomResponse,
    pub teacher_name: Option<String>,
}

#[derive(Serialize)]
pub struct StudentDashboard {
    pub role: Role,
    pub classrooms: Vec<ClassroomWithTeacher>,
    pub upcoming_assignments: Vec<AssignmentResponse>,
}

#[derive(Serialize)]
pub struct MyEnrollment {
    pub enrollment_id: i64,
    pub classroom: ClassroomResponse,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

/// GET /api/me/dashboard
///
/// Role-shaped overview. Teachers get totals over their classrooms plus
/// a recent-activity feed; students get their classrooms with teacher
/// names and what is due next.
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    match claims.role {
        Role::Teacher => teacher_dashboard(app_state, claims.sub).await,
        Role::Student => student_dashboard(app_state, claims.sub).await,
        _ => error_response(StatusCode::FORBIDDEN, "No dashboard for this role"),
    }
}

async fn teacher_dashboard(app_state: AppState, user_id: i64) -> axum::response::Response {
    let profile = match resolve_teacher_profile(&app_state, user_id).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let classrooms = match classroom::Model::owned_by_teacher(app_state.db(), profile.id).await {
        Ok(rows) => rows,
        Err(e) => return db_error(e, "Failed to load dashboard"),
    };

    let mut student_ids: HashSet<i64> = HashSet::new();
    let mut assignment_count = 0;
    let mut material_count = 0;
    let mut announcement_count = 0;
    let mut summaries = Vec::with_capacity(classrooms.len());
    let mut recent_activity: Vec<ActivityItem> = Vec::new();

    for c in classrooms {
        let enrolled = match enrollment::Model::active_for_classroom(app_state.db(), c.id).await {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to load dashboard"),
        };
        let assignments = match assignment::Model::active_for_classroom(app_state.db(), c.id).await
        {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to load dashboard"),
        };
        let materials = match material::Model::active_for_classroom(app_state.db(), c.id).await {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to load dashboard"),
        };
        let announcements =
            match announcement::Model::active_for_classroom(app_state.db(), c.id).await {
                Ok(rows) => rows,
                Err(e) => return db_error(e, "Failed to load dashboard"),
            };

        student_ids.extend(enrolled.iter().map(|e| e.student_id));
        assignment_count += assignments.len();
        material_count += materials.len();
        announcement_count += announcements.len();

        summaries.push(ClassroomSummary {
            student_count: enrolled.len(),
            assignment_count: assignments.len(),
            classroom: ClassroomResponse::from(c),
        });

        recent_activity.extend(assignments.into_iter().map(|a| ActivityItem {
            kind: "assignment",
            id: a.id,
            classroom_id: a.classroom_id,
            title: a.title,
            created_at: a.created_at,
        }));
        recent_activity.extend(materials.into_iter().map(|m| ActivityItem {
            kind: "material",
            id: m.id,
            classroom_id: m.classroom_id,
            title: m.title,
            created_at: m.uploaded_at,
        }));
        recent_activity.extend(announcements.into_iter().map(|a| ActivityItem {
            kind: "announcement",
            id: a.id,
            classroom_id: a.classroom_id,
            title: a.title,
            created_at: a.created_at,
        }));
    }

    recent_activity.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            TeacherDashboard {
                role: Role::Teacher,
                classroom_count: summaries.len(),
                student_count: student_ids.len(),
                assignment_count,
                material_count,
                announcement_count,
                classrooms: summaries,
                recent_activity,
            },
            "Dashboard retrieved",
        )),
    )
        .into_response()
}

/// Display name of the classroom's teacher, if the account still exists.
async fn teacher_display_name(
    app_state: &AppState,
    teacher_id: i64,
) -> Result<Option<String>, axum::response::Response> {
    let profile = match teacher::Entity::find_by_id(teacher_id)
        .one(app_state.db())
        .await
    {
        Ok(profile) => profile,
        Err(e) => return Err(db_error(e, "Failed to load dashboard")),
    };
    let Some(profile) = profile else {
        return Ok(None);
    };
    match user::Model::find_active_by_id(app_state.db(), profile.user_id).await {
        Ok(owner) => Ok(owner.map(|u| u.name)),
        Err(e) => Err(db_error(e, "Failed to load dashboard")),
    }
}

async fn student_dashboard(app_state: AppState, user_id: i64) -> axum::response::Response {
    let profile = match resolve_student_profile(&app_state, user_id).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let enrollments = match enrollment::Model::active_for_student(app_state.db(), profile.id).await
    {
        Ok(rows) => rows,
        Err(e) => return db_error(e, "Failed to load dashboard"),
    };
    let classroom_ids: Vec<i64> = enrollments.iter().map(|e| e.classroom_id).collect();

    let classrooms = match classroom::Entity::find()
        .filter(classroom::Column::Id.is_in(classroom_ids.clone()))
        .filter(classroom::Column::Active.eq(true))
        .order_by_desc(classroom::Column::CreatedAt)
        .all(app_state.db())
        .await
    {
        Ok(rows) => rows,
        Err(e) => return db_error(e, "Failed to load dashboard"),
    };

    // Only classrooms that are still visible count toward upcoming work.
    let visible_ids: Vec<i64> = classrooms.iter().map(|c| c.id).collect();
    let upcoming =
        match assignment::Model::upcoming_for_classrooms(app_state.db(), &visible_ids, Utc::now())
            .await
        {
            Ok(rows) => rows,
            Err(e) => return db_error(e, "Failed to load dashboard"),
        };

    let mut rows = Vec::with_capacity(classrooms.len());
    for c in classrooms {
        let teacher_name = match teacher_display_name(&app_state, c.teacher_id).await {
            Ok(name) => name,
            Err(resp) => return resp,
        };
        rows.push(ClassroomWithTeacher {
            teacher_name,
            classroom: ClassroomResponse::from(c),
        });
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            StudentDashboard {
                role: Role::Student,
                classrooms: rows,
                upcoming_assignments: upcoming.into_iter().map(AssignmentResponse::from).collect(),
            },
            "Dashboard retrieved",
        )),
    )
        .into_response()
}

/// GET /api/me/assignments/upcoming
///
/// Future-due assignments across the caller's classrooms, soonest
/// first. Works for both roles: owned classrooms for teachers, enrolled
/// ones for students.
pub async fn upcoming_assignments(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let classroom_ids = match claims.role {
        Role::Teacher => {
            let profile = match resolve_teacher_profile(&app_state, claims.sub).await {
                Ok(profile) => profile,
                Err(resp) => return resp,
            };
            match classroom::Model::owned_by_teacher(app_state.db(), profile.id).await {
                Ok(rows) => rows.into_iter().map(|c| c.id).collect::<Vec<i64>>(),
                Err(e) => return db_error(e, "Failed to load assignments"),
            }
        }
        Role::Student => {
            let profile = match resolve_student_profile(&app_state, claims.sub).await {
                Ok(profile) => profile,
                Err(resp) => return resp,
            };
            let enrollments =
                match enrollment::Model::active_for_student(app_state.db(), profile.id).await {
                    Ok(rows) => rows,
                    Err(e) => return db_error(e, "Failed to load assignments"),
                };
            let ids: Vec<i64> = enrollments.iter().map(|e| e.classroom_id).collect();
            // Filter out classrooms that were soft-deleted since enrolling.
            match classroom::Entity::find()
                .filter(classroom::Column::Id.is_in(ids))
                .filter(classroom::Column::Active.eq(true))
                .all(app_state.db())
                .await
            {
                Ok(rows) => rows.into_iter().map(|c| c.id).collect(),
                Err(e) => return db_error(e, "Failed to load assignments"),
            }
        }
        _ => Vec::new(),
    };

    match assignment::Model::upcoming_for_classrooms(app_state.db(), &classroom_ids, Utc::now())
        .await
    {
        Ok(rows) => {
            let data: Vec<AssignmentResponse> =
                rows.into_iter().map(AssignmentResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Upcoming assignments retrieved")),
            )
                .into_response()
        }
        Err(e) => db_error(e, "Failed to load assignments"),
    }
}

/// GET /api/me/enrollments
///
/// The calling student's active enrollments with their classrooms.
pub async fn enrollments(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    if claims.role != Role::Student {
        return error_response(StatusCode::FORBIDDEN, "Student role required");
    }

    let profile = match resolve_student_profile(&app_state, claims.sub).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let rows = match enrollment::Model::active_for_student(app_state.db(), profile.id).await {
        Ok(rows) => rows,
        Err(e) => return db_error(e, "Failed to load enrollments"),
    };

    let mut data = Vec::with_capacity(rows.len());
    for row in rows {
        match classroom::Model::find_active(app_state.db(), row.classroom_id).await {
            // Enrollments into soft-deleted classrooms stay hidden.
            Ok(Some(c)) => data.push(MyEnrollment {
                enrollment_id: row.id,
                classroom: ClassroomResponse::from(c),
                enrollment_date: row.enrollment_date,
                status: row.status,
            }),
            Ok(None) => continue,
            Err(e) => return db_error(e, "Failed to load enrollments"),
        }
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(data, "Enrollments retrieved")),
    )
        .into_response()
}
