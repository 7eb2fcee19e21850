//! Enrollment routes: students join, owners see the roster and drop.

pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete as delete_route, get as get_route, post as post_route},
};

use crate::auth::guards::{require_classroom_owner, require_student};
use crate::state::AppState;

pub fn enrollment_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post_route(post::enroll))
        .route_layer(from_fn(require_student))
        .merge(
            Router::new()
                .route("/", get_route(get::roster))
                .route("/{student_id}", delete_route(delete::drop_student))
                .route_layer(from_fn_with_state(app_state, require_classroom_owner)),
        )
}
