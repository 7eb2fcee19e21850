//! Shared response shapes for submission routes.

use chrono::{DateTime, Utc};
use db::models::submission::{self, SubmissionStatus};
use serde::Serialize;

/// Wire view of a submission. `is_late` is derived from the owning
/// assignment's current due date on every read and never stored.
#[derive(Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub link: String,
    pub submitted_at: DateTime<Utc>,
    pub is_late: bool,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
}

impl SubmissionResponse {
    pub fn from_model(model: submission::Model, due_date: DateTime<Utc>) -> Self {
        Self {
            is_late: submission::is_late(model.submitted_at, due_date),
            id: model.id,
            assignment_id: model.assignment_id,
            student_id: model.student_id,
            link: model.link,
            submitted_at: model.submitted_at,
            score: model.score,
            feedback: model.feedback,
            status: model.status,
        }
    }
}
