use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

/// An assignment belonging to a classroom.
///
/// `max_points` is always positive; the grading bounds check in the
/// submission state machine relies on it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub classroom_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_points: i32,
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

    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::classroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
        title: &str,
        description: Option<String>,
        due_date: DateTime<Utc>,
        max_points: i32,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            classroom_id: Set(classroom_id),
            title: Set(title.to_owned()),
            description: Set(description),
            due_date: Set(due_date),
            max_points: Set(max_points),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Finds an active assignment scoped to its classroom. Scoping to the
    /// parent keeps cross-classroom ID probing indistinguishable from 404.
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

    /// Active assignments of a classroom, most recently due first.
    pub async fn active_for_classroom<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::DueDate)
            .all(db)
            .await
    }

    /// Future-due assignments across a set of classrooms, soonest first.
    pub async fn upcoming_for_classrooms<C: ConnectionTrait>(
        db: &C,
        classroom_ids: &[i64],
        now: DateTime<Utc>,
    ) -> Result<Vec<Model>, DbErr> {
        if classroom_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::ClassroomId.is_in(classroom_ids.to_vec()))
            .filter(Column::Active.eq(true))
            .filter(Column::DueDate.gt(now))
            .order_by_asc(Column::DueDate)
            .all(db)
            .await
    }

    pub async fn soft_delete<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let mut assignment: ActiveModel = self.into();
        assignment.active = Set(false);
        assignment.updated_at = Set(Utc::now());
        assignment.update(db).await
    }
}
