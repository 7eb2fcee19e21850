use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Role;
use db::models::{student, teacher, user};
use serde::Serialize;
use serde_json::json;

use super::common::UserResponse;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_profile: Option<teacher::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_profile: Option<student::Model>,
}

/// GET /api/auth/me
///
/// Returns the calling account together with its role profile.
pub async fn me(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    let user = match user::Model::find_active_by_id(app_state.db(), claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to load user: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to load user")),
            )
                .into_response();
        }
    };

    let mut response = MeResponse {
        user: UserResponse::from(user.clone()),
        teacher_profile: None,
        student_profile: None,
    };

    let profile = match user.role {
        Role::Teacher => teacher::Model::find_by_user_id(app_state.db(), user.id)
            .await
            .map(|p| response.teacher_profile = p),
        Role::Student => student::Model::find_by_user_id(app_state.db(), user.id)
            .await
            .map(|p| response.student_profile = p),
        _ => Ok(()),
    };

    if let Err(e) = profile {
        tracing::error!("Failed to load role profile: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("Failed to load user")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "User retrieved")),
    )
        .into_response()
}

/// GET /api/auth/check
///
/// Cheap token introspection: answers with the claims if the token is
/// still valid, without touching the database.
pub async fn check(AuthUser(claims): AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({ "user_id": claims.sub, "role": claims.role }),
            "Token valid",
        )),
    )
}
