//! Announcement routes: owner posts and pins, members read.

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get as get_route, post as post_route, put as put_route},
};

use crate::auth::guards::{require_classroom_member, require_classroom_owner};
use crate::state::AppState;

pub fn announcement_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post_route(post::create))
        .route(
            "/{announcement_id}",
            put_route(put::edit).delete(delete::remove),
        )
        .route("/{announcement_id}/pin", put_route(put::pin))
        .route("/{announcement_id}/unpin", put_route(put::unpin))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            require_classroom_owner,
        ))
        .merge(
            Router::new()
                .route("/", get_route(get::list))
                .route("/{announcement_id}", get_route(get::detail))
                .route_layer(from_fn_with_state(app_state, require_classroom_member)),
        )
}
