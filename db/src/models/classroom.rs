use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

/// A classroom owned by exactly one teacher.
///
/// Every child entity (assignment, material, announcement, enrollment)
/// resolves its visibility and mutation rights through this row: the
/// classroom must be active and, for mutations, owned by the caller.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub subject_area: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,

    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignment,

    #[sea_orm(has_many = "super::material::Entity")]
    Material,

    #[sea_orm(has_many = "super::announcement::Entity")]
    Announcement,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        teacher_id: i64,
        title: &str,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        subject_area: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(title.to_owned()),
            description: Set(description),
            start_date: Set(start_date),
            end_date: Set(end_date),
            subject_area: Set(subject_area),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Finds a classroom that has not been soft-deleted.
    pub async fn find_active<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }

    /// Walks classroom → teacher → user to decide whether the calling user
    /// account owns this classroom. Resolved per request; no cached ACLs.
    pub async fn is_owned_by_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i64,
    ) -> Result<bool, DbErr> {
        let profile = super::teacher::Model::find_by_user_id(db, user_id).await?;
        Ok(profile.map(|t| t.id == self.teacher_id).unwrap_or(false))
    }

    /// All active classrooms owned by a teacher, newest first.
    pub async fn owned_by_teacher<C: ConnectionTrait>(
        db: &C,
        teacher_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Soft delete: the row stays, every read path stops seeing it, and all
    /// children become unreachable through the ancestor filter.
    pub async fn soft_delete<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let mut classroom: ActiveModel = self.into();
        classroom.active = Set(false);
        classroom.updated_at = Set(Utc::now());
        classroom.update(db).await
    }
}
