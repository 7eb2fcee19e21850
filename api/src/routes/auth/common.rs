use chrono::{DateTime, Utc};
use db::models::user::{self, Role};
use serde::Serialize;

/// Public view of a user account. Never carries the password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub contact_number: Option<String>,
    pub org: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            contact_number: user.contact_number,
            org: user.org,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
