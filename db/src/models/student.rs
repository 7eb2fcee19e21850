use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::Serialize;

/// Student role profile, 1:1 with a user account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub grade_level: Option<String>,
    pub enrollment_year: Option<i32>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        grade_level: Option<String>,
        enrollment_year: Option<i32>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            user_id: Set(user_id),
            grade_level: Set(grade_level),
            enrollment_year: Set(enrollment_year),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Resolves the active student profile for a user account.
    pub async fn find_by_user_id<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }

    /// Partial profile update: absent fields keep their prior values.
    pub async fn update_profile<C: ConnectionTrait>(
        self,
        db: &C,
        grade_level: Option<String>,
        enrollment_year: Option<i32>,
    ) -> Result<Model, DbErr> {
        let mut profile: ActiveModel = self.into();
        if let Some(level) = grade_level {
            profile.grade_level = Set(Some(level));
        }
        if let Some(year) = enrollment_year {
            profile.enrollment_year = Set(Some(year));
        }
        profile.update(db).await
    }
}
