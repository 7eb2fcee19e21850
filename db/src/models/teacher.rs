use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::Serialize;

/// Teacher role profile, 1:1 with a user account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub department: Option<String>,
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

    #[sea_orm(has_many = "super::classroom::Entity")]
    Classroom,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::classroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        department: Option<String>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            user_id: Set(user_id),
            department: Set(department),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Resolves the active teacher profile for a user account.
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

    pub async fn update_department<C: ConnectionTrait>(
        self,
        db: &C,
        department: Option<String>,
    ) -> Result<Model, DbErr> {
        let mut profile: ActiveModel = self.into();
        profile.department = Set(department);
        profile.update(db).await
    }
}
