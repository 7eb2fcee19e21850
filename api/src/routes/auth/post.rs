use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::{self, Role, RoleProfile};
use sea_orm::SqlErr;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::common::UserResponse;
use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    pub role: String,
    pub contact_number: Option<String>,
    pub org: Option<String>,
    /// Teacher profile field.
    pub department: Option<String>,
    /// Student profile fields.
    pub grade_level: Option<String>,
    pub enrollment_year: Option<i32>,
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        let mut err = ValidationError::new("password_length");
        err.message = Some("Password must be at least 8 characters".into());
        return Err(err);
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        let mut err = ValidationError::new("password_strength");
        err.message = Some("Password must contain at least one letter and one digit".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// POST /api/auth/register
///
/// Creates a user account with its role profile in one transaction. The
/// role is fixed here and never changes afterwards.
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let role = match Role::from_str(&req.role) {
        Ok(role @ (Role::Teacher | Role::Student)) => role,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    "Role must be 'teacher' or 'student'",
                )),
            )
                .into_response();
        }
    };

    let profile = match role {
        Role::Teacher => RoleProfile::Teacher {
            department: req.department.clone(),
        },
        Role::Student => RoleProfile::Student {
            grade_level: req.grade_level.clone(),
            enrollment_year: req.enrollment_year,
        },
        _ => RoleProfile::None,
    };

    match user::Model::register(
        app_state.db(),
        &req.name,
        &req.email,
        &req.password,
        role,
        req.contact_number.clone(),
        req.org.clone(),
        profile,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse::from(created),
                "User registered successfully",
            )),
        )
            .into_response(),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<()>::error("Email already registered")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to register user: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to register user")),
            )
                .into_response()
        }
    }
}

/// POST /api/auth/login
///
/// Verifies credentials and issues a JWT. Unknown email and wrong
/// password answer identically.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        )
            .into_response();
    }

    let user = match user::Model::find_active_by_email(app_state.db(), &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::error("Invalid email or password")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Login lookup failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Login failed")),
            )
                .into_response();
        }
    };

    if !user.verify_password(&req.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("Invalid email or password")),
        )
            .into_response();
    }

    let (token, expires_at) = generate_jwt(user.id, user.role);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                token,
                expires_at,
                user: UserResponse::from(user),
            },
            "Login successful",
        )),
    )
        .into_response()
}
