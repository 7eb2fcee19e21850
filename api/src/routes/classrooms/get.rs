use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::Role;
use db::models::{classroom, enrollment};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use super::common::{
    ClassroomDetailResponse, ClassroomResponse, db_error, load_classroom, resolve_student_profile,
    resolve_teacher_profile,
};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/classrooms
///
/// Role-scoped listing: teachers see the classrooms they own, students
/// the ones they are enrolled in, admins every active classroom.
pub async fn list(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let classrooms = match claims.role {
        Role::Teacher => {
            let profile = match resolve_teacher_profile(&app_state, claims.sub).await {
                Ok(profile) => profile,
                Err(resp) => return resp,
            };
            classroom::Model::owned_by_teacher(app_state.db(), profile.id).await
        }
        Role::Student => {
            let profile = match resolve_student_profile(&app_state, claims.sub).await {
                Ok(profile) => profile,
                Err(resp) => return resp,
            };
            match enrollment::Model::active_for_student(app_state.db(), profile.id).await {
                Ok(enrollments) => {
                    let ids: Vec<i64> = enrollments.iter().map(|e| e.classroom_id).collect();
                    classroom::Entity::find()
                        .filter(classroom::Column::Id.is_in(ids))
                        .filter(classroom::Column::Active.eq(true))
                        .order_by_desc(classroom::Column::CreatedAt)
                        .all(app_state.db())
                        .await
                }
                Err(e) => Err(e),
            }
        }
        _ => {
            classroom::Entity::find()
                .filter(classroom::Column::Active.eq(true))
                .order_by_desc(classroom::Column::CreatedAt)
                .all(app_state.db())
                .await
        }
    };

    match classrooms {
        Ok(rows) => {
            let data: Vec<ClassroomResponse> =
                rows.into_iter().map(ClassroomResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Classrooms retrieved")),
            )
                .into_response()
        }
        Err(e) => db_error(e, "Failed to list classrooms"),
    }
}

/// GET /api/classrooms/{classroom_id}
///
/// Detail view with the live class size. Membership is enforced by the
/// route guard.
pub async fn detail(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    let classroom = match load_classroom(&app_state, classroom_id).await {
        Ok(classroom) => classroom,
        Err(resp) => return resp,
    };

    let class_size =
        match enrollment::Model::active_count_for_classroom(app_state.db(), classroom_id).await {
            Ok(count) => count,
            Err(e) => return db_error(e, "Failed to count enrollments"),
        };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ClassroomDetailResponse {
                classroom: ClassroomResponse::from(classroom),
                class_size,
            },
            "Classroom retrieved",
        )),
    )
        .into_response()
}
