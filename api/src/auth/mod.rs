//! Authentication: JWT issuance, claims extraction, and route guards.

pub mod claims;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use db::models::user::Role;
use jsonwebtoken::{EncodingKey, Header, encode};

/// Generates a JWT for the given user ID and role.
///
/// Token lifetime comes from `JWT_DURATION_MINUTES`. Returns the signed
/// token together with its expiry timestamp as an RFC 3339 string.
pub fn generate_jwt(user_id: i64, role: Role) -> (String, String) {
    let expiration = Utc::now() + Duration::minutes(common::config::jwt_duration_minutes() as i64);

    let claims = Claims {
        sub: user_id,
        role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(common::config::jwt_secret().as_bytes()),
    )
    .expect("Token generation failed");

    (token, expiration.to_rfc3339())
}
