//! Assignment routes, plus nested statistics and submissions.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;
pub mod statistics;
pub mod submissions;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get as get_route, post as post_route, put as put_route},
};

use crate::auth::guards::{require_classroom_member, require_classroom_owner};
use crate::state::AppState;

pub fn assignment_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post_route(post::create))
        .route(
            "/{assignment_id}",
            put_route(put::edit).delete(delete::remove),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            require_classroom_owner,
        ))
        .merge(
            Router::new()
                .route("/", get_route(get::list))
                .route("/{assignment_id}", get_route(get::detail))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    require_classroom_member,
                )),
        )
        .nest(
            "/{assignment_id}/statistics",
            statistics::statistics_routes().route_layer(from_fn_with_state(
                app_state.clone(),
                require_classroom_owner,
            )),
        )
        .nest(
            "/{assignment_id}/submissions",
            submissions::submission_routes(app_state),
        )
}
