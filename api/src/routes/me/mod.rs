//! Routes scoped to the calling account. All of them sit behind the
//! authentication layer applied in the parent router.

pub mod get;
pub mod put;

use axum::{
    Router,
    routing::{get as get_route, put as put_route},
};

use crate::state::AppState;

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get_route(get::dashboard))
        .route("/assignments/upcoming", get_route(get::upcoming_assignments))
        .route("/enrollments", get_route(get::enrollments))
        .route("/profile", put_route(put::profile))
}
