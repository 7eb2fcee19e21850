//! Route guards, applied as middleware layers per route.
//!
//! Policy: a failed role check answers 403; a failed ownership or
//! membership check answers 404 with the same body as a missing
//! classroom, so outsiders cannot distinguish "exists but not yours"
//! from "does not exist".

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::{classroom, enrollment, student, user::Role};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

fn classroom_id_from(params: &HashMap<String, String>) -> Result<i64, Response> {
    params
        .get("classroom_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Invalid classroom ID"))
}

/// Allows any request carrying a valid token.
pub async fn allow_authenticated(_auth: AuthUser, req: Request, next: Next) -> Response {
    next.run(req).await
}

/// Allows only teacher accounts.
pub async fn require_teacher(AuthUser(claims): AuthUser, req: Request, next: Next) -> Response {
    if claims.role != Role::Teacher {
        return error_response(StatusCode::FORBIDDEN, "Teacher role required");
    }
    next.run(req).await
}

/// Allows only student accounts.
pub async fn require_student(AuthUser(claims): AuthUser, req: Request, next: Next) -> Response {
    if claims.role != Role::Student {
        return error_response(StatusCode::FORBIDDEN, "Student role required");
    }
    next.run(req).await
}

/// Allows only the teacher who owns the classroom in the path.
///
/// Ownership is resolved per request by walking classroom → teacher
/// profile → user; nothing is cached between requests.
pub async fn require_classroom_owner(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    AuthUser(claims): AuthUser,
    req: Request,
    next: Next,
) -> Response {
    let classroom_id = match classroom_id_from(&params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if claims.role != Role::Teacher {
        return error_response(StatusCode::FORBIDDEN, "Teacher role required");
    }

    let classroom = match classroom::Model::find_active(app_state.db(), classroom_id).await {
        Ok(Some(c)) => c,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => {
            tracing::error!("Ownership check failed: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    match classroom.is_owned_by_user(app_state.db(), claims.sub).await {
        Ok(true) => next.run(req).await,
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => {
            tracing::error!("Ownership check failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// Allows the classroom's owner or an actively enrolled student.
pub async fn require_classroom_member(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    AuthUser(claims): AuthUser,
    req: Request,
    next: Next,
) -> Response {
    let classroom_id = match classroom_id_from(&params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let classroom = match classroom::Model::find_active(app_state.db(), classroom_id).await {
        Ok(Some(c)) => c,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => {
            tracing::error!("Membership check failed: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    let allowed = match claims.role {
        Role::Teacher => classroom.is_owned_by_user(app_state.db(), claims.sub).await,
        Role::Student => match student::Model::find_by_user_id(app_state.db(), claims.sub).await {
            Ok(Some(profile)) => {
                enrollment::Model::is_enrolled(app_state.db(), profile.id, classroom_id).await
            }
            Ok(None) => Ok(false),
            Err(e) => Err(e),
        },
        _ => Ok(false),
    };

    match allowed {
        Ok(true) => next.run(req).await,
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => {
            tracing::error!("Membership check failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// Allows only a student actively enrolled in the classroom in the path.
pub async fn require_enrolled_student(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    AuthUser(claims): AuthUser,
    req: Request,
    next: Next,
) -> Response {
    let classroom_id = match classroom_id_from(&params) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if claims.role != Role::Student {
        return error_response(StatusCode::FORBIDDEN, "Student role required");
    }

    if let Err(resp) = ensure_classroom_exists(&app_state, classroom_id).await {
        return resp;
    }

    let enrolled = match student::Model::find_by_user_id(app_state.db(), claims.sub).await {
        Ok(Some(profile)) => {
            enrollment::Model::is_enrolled(app_state.db(), profile.id, classroom_id).await
        }
        Ok(None) => Ok(false),
        Err(e) => Err(e),
    };

    match enrolled {
        Ok(true) => next.run(req).await,
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Classroom not found"),
        Err(e) => {
            tracing::error!("Enrollment check failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

async fn ensure_classroom_exists(app_state: &AppState, classroom_id: i64) -> Result<(), Response> {
    match classroom::Model::find_active(app_state.db(), classroom_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Classroom not found")),
        Err(e) => {
            tracing::error!("Classroom lookup failed: {e}");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error",
            ))
        }
    }
}
