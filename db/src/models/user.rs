use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user account in the `users` table.
///
/// A user owns at most one role profile (`teachers` or `students` row),
/// created in the same transaction as the account itself.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// User's unique email address.
    pub email: String,
    /// Securely hashed password string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role assigned at registration; immutable afterwards.
    pub role: Role,
    pub contact_number: Option<String>,
    pub org: Option<String>,
    /// Soft-delete marker; inactive users are invisible to every query.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account role, fixed at registration time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "dev")]
    Dev,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::teacher::Entity")]
    Teacher,

    #[sea_orm(has_one = "super::student::Entity")]
    Student,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Role-profile payload supplied at registration.
#[derive(Debug, Clone)]
pub enum RoleProfile {
    Teacher {
        department: Option<String>,
    },
    Student {
        grade_level: Option<String>,
        enrollment_year: Option<i32>,
    },
    None,
}

impl Model {
    /// Hashes a plaintext password with argon2 and a fresh salt.
    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))
    }

    /// Verifies a plaintext password against this user's stored hash.
    ///
    /// argon2's verifier compares in constant time, so a mismatch is
    /// indistinguishable (timing-wise) from any other mismatch.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Registers a new account plus its role profile in a single transaction.
    ///
    /// Either all rows land or none do; the caller sees the first failure.
    pub async fn register(
        db: &DatabaseConnection,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        contact_number: Option<String>,
        org: Option<String>,
        profile: RoleProfile,
    ) -> Result<Model, DbErr> {
        let password_hash = Self::hash_password(password)?;
        let now = Utc::now();

        let txn = db.begin().await?;

        let user = ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            role: Set(role),
            contact_number: Set(contact_number),
            org: Set(org),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        match profile {
            RoleProfile::Teacher { department } => {
                super::teacher::Model::create(&txn, user.id, department).await?;
            }
            RoleProfile::Student {
                grade_level,
                enrollment_year,
            } => {
                super::student::Model::create(&txn, user.id, grade_level, enrollment_year).await?;
            }
            RoleProfile::None => {}
        }

        txn.commit().await?;
        Ok(user)
    }

    /// Finds an active user by exact (case-sensitive) email.
    pub async fn find_active_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }

    pub async fn find_active_by_id<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = Model::hash_password("s3cret-pass").unwrap();
        assert_ne!(hash, "s3cret-pass");

        let user = Model {
            id: 1,
            name: "Test".into(),
            email: "t@example.com".into(),
            password_hash: hash,
            role: Role::Teacher,
            contact_number: None,
            org: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(user.verify_password("s3cret-pass"));
        assert!(!user.verify_password("wrong-pass"));
    }

    #[test]
    fn role_parses_case_insensitively() {
        use std::str::FromStr;
        assert_eq!(Role::from_str("Teacher").unwrap(), Role::Teacher);
        assert_eq!(Role::from_str("student").unwrap(), Role::Student);
        assert!(Role::from_str("principal").is_err());
    }
}
