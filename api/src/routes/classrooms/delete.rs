use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::common::{db_error, load_classroom};
use crate::response::ApiResponse;
use crate::state::AppState;

/// DELETE /api/classrooms/{classroom_id}
///
/// Soft delete: the classroom and everything nested under it vanish from
/// every read path, but no rows are destroyed. Repeating the call
/// answers 404 because the row is already invisible.
pub async fn remove(
    State(app_state): State<AppState>,
    Path(classroom_id): Path<i64>,
) -> impl IntoResponse {
    let classroom = match load_classroom(&app_state, classroom_id).await {
        Ok(classroom) => classroom,
        Err(resp) => return resp,
    };

    match classroom.soft_delete(app_state.db()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Classroom deleted successfully")),
        )
            .into_response(),
        Err(e) => db_error(e, "Failed to delete classroom"),
    }
}
