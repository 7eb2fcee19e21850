use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

/// Course material attached to a classroom. The file path/URL is an opaque
/// string; no storage engine sits behind it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub classroom_id: i64,
    pub title: String,
    pub material_type: Option<String>,
    pub file_path: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    pub uploaded_at: DateTime<Utc>,
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
        material_type: Option<String>,
        file_path: Option<String>,
        description: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            classroom_id: Set(classroom_id),
            title: Set(title.to_owned()),
            material_type: Set(material_type),
            file_path: Set(file_path),
            description: Set(description),
            active: Set(true),
            uploaded_at: Set(now),
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

    /// Active materials of a classroom, newest upload first.
    pub async fn active_for_classroom<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::UploadedAt)
            .all(db)
            .await
    }

    pub async fn soft_delete<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let mut material: ActiveModel = self.into();
        material.active = Set(false);
        material.updated_at = Set(Utc::now());
        material.update(db).await
    }
}
