//! Shared response shapes and helpers for assignment routes.

use axum::{http::StatusCode, response::Response};
use chrono::{DateTime, Utc};
use db::models::assignment;
use serde::Serialize;

use super::super::common::{db_error, error_response};
use crate::state::AppState;

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub id: i64,
    pub classroom_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<assignment::Model> for AssignmentResponse {
    fn from(assignment: assignment::Model) -> Self {
        Self {
            id: assignment.id,
            classroom_id: assignment.classroom_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            max_points: assignment.max_points,
            created_at: assignment.created_at,
            updated_at: assignment.updated_at,
        }
    }
}

/// List/detail view with per-assignment progress counters.
#[derive(Serialize)]
pub struct AssignmentWithProgress {
    #[serde(flatten)]
    pub assignment: AssignmentResponse,
    pub submission_count: u64,
    pub graded_count: u64,
    pub completion_percent: f64,
    pub graded_percent: f64,
}

/// Percentage of `part` in `whole`, one decimal, 0.0 for an empty whole.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    ((part as f64 / whole as f64) * 1000.0).round() / 10.0
}

/// Loads an active assignment scoped to its classroom, or answers 404.
pub async fn load_assignment(
    app_state: &AppState,
    classroom_id: i64,
    assignment_id: i64,
) -> Result<assignment::Model, Response> {
    match assignment::Model::find_active(app_state.db(), classroom_id, assignment_id).await {
        Ok(Some(assignment)) => Ok(assignment),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            "Assignment not found",
        )),
        Err(e) => Err(db_error(e, "Failed to load assignment")),
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_handles_empty_whole() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(5, 0), 0.0);
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
        assert_eq!(percent(3, 3), 100.0);
    }
}
