use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set, SqlErr, TransactionTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::assignment;

/// A student's submission for an assignment.
///
/// Lifecycle: `submitted → graded`. There is at most one row per
/// (assignment, student); resubmission overwrites the row in place.
/// Lateness is never stored — it is recomputed from the assignment's
/// current due date on every read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    /// Opaque link to the submitted work.
    pub link: String,
    pub submitted_at: DateTime<Utc>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum SubmissionStatus {
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "graded")]
    Graded,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Resubmission attempted after the due date with a live submission
    /// already on record.
    #[error("Submission already exists and the due date has passed")]
    ResubmitAfterDue,
    /// Score outside `0..=max_points`.
    #[error("Score must be between 0 and {max_points}")]
    ScoreOutOfBounds { max_points: i32 },
    #[error("Submission not found")]
    NotFound,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Outcome of a bulk-grade batch: per-item results, never all-or-nothing.
#[derive(Debug, Serialize)]
pub struct BulkGradeOutcome {
    pub success_count: usize,
    pub failed_ids: Vec<i64>,
}

/// A submission is late iff it arrived strictly after the due date.
/// Pure function of the two timestamps, so editing the due date later
/// changes the answer without touching the submission row.
pub fn is_late(submitted_at: DateTime<Utc>, due_date: DateTime<Utc>) -> bool {
    submitted_at > due_date
}

/// Grading bounds: inclusive on both ends.
pub fn validate_score(score: i32, max_points: i32) -> Result<(), SubmissionError> {
    if score < 0 || score > max_points {
        return Err(SubmissionError::ScoreOutOfBounds { max_points });
    }
    Ok(())
}

impl Model {
    /// Submits work for an assignment.
    ///
    /// Policy: a first submission is accepted at any time (late ones are
    /// tagged in the response, never in the row). A resubmission overwrites
    /// the existing row while `now ≤ due_date` — resetting any earlier
    /// grade — and is rejected once the due date has passed. A racing
    /// duplicate insert trips the unique index and reports the same
    /// rejection as an explicit conflict.
    pub async fn submit<C: ConnectionTrait>(
        db: &C,
        assignment: &assignment::Model,
        student_id: i64,
        link: &str,
        now: DateTime<Utc>,
    ) -> Result<Model, SubmissionError> {
        let existing = Entity::find()
            .filter(Column::AssignmentId.eq(assignment.id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await?;

        if let Some(prior) = existing {
            if prior.active && now > assignment.due_date {
                return Err(SubmissionError::ResubmitAfterDue);
            }
            // Overwrite in place (also reactivates a withdrawn row).
            let mut row: ActiveModel = prior.into();
            row.link = Set(link.to_owned());
            row.submitted_at = Set(now);
            row.score = Set(None);
            row.feedback = Set(None);
            row.status = Set(SubmissionStatus::Submitted);
            row.active = Set(true);
            row.updated_at = Set(now);
            return Ok(row.update(db).await?);
        }

        let inserted = ActiveModel {
            assignment_id: Set(assignment.id),
            student_id: Set(student_id),
            link: Set(link.to_owned()),
            submitted_at: Set(now),
            score: Set(None),
            feedback: Set(None),
            status: Set(SubmissionStatus::Submitted),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await;

        match inserted {
            Ok(row) => Ok(row),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(SubmissionError::ResubmitAfterDue)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Grades this submission: validates the score against the assignment's
    /// `max_points`, records feedback, and transitions to `graded`.
    pub async fn grade<C: ConnectionTrait>(
        self,
        db: &C,
        assignment: &assignment::Model,
        score: i32,
        feedback: Option<String>,
    ) -> Result<Model, SubmissionError> {
        validate_score(score, assignment.max_points)?;

        let mut row: ActiveModel = self.into();
        row.score = Set(Some(score));
        row.feedback = Set(feedback);
        row.status = Set(SubmissionStatus::Graded);
        row.updated_at = Set(Utc::now());
        Ok(row.update(db).await?)
    }

    /// Applies one score/feedback pair to many submissions of the same
    /// assignment inside a single transaction. IDs that do not resolve to a
    /// live submission of that assignment are collected instead of aborting
    /// the batch; the transaction still commits the rest.
    pub async fn bulk_grade(
        db: &DatabaseConnection,
        assignment: &assignment::Model,
        submission_ids: &[i64],
        score: i32,
        feedback: Option<String>,
    ) -> Result<BulkGradeOutcome, SubmissionError> {
        validate_score(score, assignment.max_points)?;

        let txn = db.begin().await?;
        let mut success_count = 0;
        let mut failed_ids = Vec::new();

        for &id in submission_ids {
            let found = Entity::find_by_id(id)
                .filter(Column::AssignmentId.eq(assignment.id))
                .filter(Column::Active.eq(true))
                .one(&txn)
                .await?;

            match found {
                Some(submission) => {
                    let mut row: ActiveModel = submission.into();
                    row.score = Set(Some(score));
                    row.feedback = Set(feedback.clone());
                    row.status = Set(SubmissionStatus::Graded);
                    row.updated_at = Set(Utc::now());
                    row.update(&txn).await?;
                    success_count += 1;
                }
                None => failed_ids.push(id),
            }
        }

        txn.commit().await?;
        Ok(BulkGradeOutcome {
            success_count,
            failed_ids,
        })
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

    /// Live submissions for an assignment, newest first.
    pub async fn active_for_assignment<C: ConnectionTrait>(
        db: &C,
        assignment_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::SubmittedAt)
            .all(db)
            .await
    }

    pub async fn find_active_for_student<C: ConnectionTrait>(
        db: &C,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Active.eq(true))
            .one(db)
            .await
    }

    /// Withdraws (soft-deletes) this submission.
    pub async fn withdraw<C: ConnectionTrait>(self, db: &C) -> Result<Model, DbErr> {
        let mut row: ActiveModel = self.into();
        row.active = Set(false);
        row.updated_at = Set(Utc::now());
        row.update(db).await
    }
}
