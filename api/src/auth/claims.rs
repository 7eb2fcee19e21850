use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use db::models::user::Role;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;

/// JWT claims carried by every authenticated request.
///
/// `role` is typed: a token minted with a role string this enum does not
/// know is rejected at decode time, before any handler runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: i64,
    /// Account role at issuance time.
    pub role: Role,
    /// Expiry as a Unix timestamp (seconds).
    pub exp: usize,
}

/// Extractor that authenticates a request from its `Authorization: Bearer`
/// header and exposes the decoded [`Claims`].
pub struct AuthUser(pub Claims);

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| unauthorized("Authorization header missing or malformed"))?;

        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(common::config::jwt_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser(token_data.claims))
    }
}
