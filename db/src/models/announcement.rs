use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub classroom_id: i64,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classroom::Entity",
        from = "Column::ClassroomId",
        to = "super::classroom::Column::Id",
        on_delete = "Cascade"
    )]
    Classroom,
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
        classroom_id: i64,
        title: &str,
        content: &str,
        pinned: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            classroom_id: Set(classroom_id),
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            pinned: Set(pinned),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
        id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }

    /// Active announcements, pinned first, then newest.
    pub async fn active_for_classroom<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::Pinned)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn set_pinned<C: ConnectionTrait>(
        self,
        db: &C,
        pinned: bool,
    ) -> Result<Model, DbErr> {
        let mut announcement: ActiveModel = self.into();
        announcement.pinned = Set(pinned);
        announcement.updated_at = Set(Utc::now());
        announcement.update(db).await
    }

    pub async fn soft_delete<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let mut announcement: ActiveModel = self.into();
        announcement.active = Set(false);
        announcement.updated_at = Set(Utc::now());
        announcement.update(db).await
    }
}
