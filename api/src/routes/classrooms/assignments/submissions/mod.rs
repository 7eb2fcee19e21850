//! Submission routes: students submit and withdraw, owners review and
//! grade.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete as delete_route, get as get_route, post as post_route},
};

use crate::auth::guards::{
    require_classroom_member, require_classroom_owner, require_enrolled_student,
};
use crate::state::AppState;

pub fn submission_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post_route(post::submit))
        .route("/my", get_route(get::my_submission))
        .route("/{submission_id}", delete_route(delete::withdraw))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            require_enrolled_student,
        ))
        .merge(
            Router::new()
                .route("/", get_route(get::list))
                .route("/{submission_id}/grade", post_route(post::grade))
                .route("/bulk-grade", post_route(post::bulk_grade))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    require_classroom_owner,
                )),
        )
        .merge(
            Router::new()
                .route("/{submission_id}", get_route(get::detail))
                .route_layer(from_fn_with_state(app_state, require_classroom_member)),
        )
}
