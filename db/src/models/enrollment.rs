use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, Set, SqlErr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Links a student to a classroom. Unique per (student, classroom);
/// unenrollment soft-drops the row and re-enrollment reactivates it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub classroom_id: i64,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub active: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EnrollmentStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "dropped")]
    Dropped,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::classroom::Entity",
        from = "Column::ClassroomId",
        to = "super::classroom::Column::Id",
        on_delete = "Cascade"
    )]
    Classroom,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::classroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("Student already enrolled in this classroom")]
    AlreadyEnrolled,
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl Model {
    /// Enrolls a student, reactivating a previously dropped row if one
    /// exists. A concurrent duplicate insert trips the unique index and is
    /// reported as `AlreadyEnrolled`.
    pub async fn enroll<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<Model, EnrollmentError> {
        if let Some(existing) = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassroomId.eq(classroom_id))
            .one(db)
            .await?
        {
            if existing.active {
                return Err(EnrollmentError::AlreadyEnrolled);
            }
            let mut row: ActiveModel = existing.into();
            row.status = Set(EnrollmentStatus::Active);
            row.active = Set(true);
            row.enrollment_date = Set(Utc::now());
            return Ok(row.update(db).await?);
        }

        let inserted = ActiveModel {
            student_id: Set(student_id),
            classroom_id: Set(classroom_id),
            enrollment_date: Set(Utc::now()),
            status: Set(EnrollmentStatus::Active),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await;

        match inserted {
            Ok(row) => Ok(row),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(EnrollmentError::AlreadyEnrolled)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the student has a live enrollment in the classroom. This is
    /// the student side of the ownership chain for all classroom children.
    pub async fn is_enrolled<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Class size: active enrollments only; dropped rows never count.
    pub async fn active_count_for_classroom<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .count(db)
            .await
    }

    pub async fn active_for_classroom<C: ConnectionTrait>(
        db: &C,
        classroom_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .all(db)
            .await
    }

    pub async fn active_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Active.eq(true))
            .all(db)
            .await
    }

    /// Drops the student from the classroom: status becomes `dropped` and
    /// the row goes inactive, vanishing from rosters and class size.
    pub async fn drop_student<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        let Some(existing) = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Active.eq(true))
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let mut row: ActiveModel = existing.into();
        row.status = Set(EnrollmentStatus::Dropped);
        row.active = Set(false);
        Ok(Some(row.update(db).await?))
    }
}
