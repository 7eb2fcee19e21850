//! Account routes: registration, login, and current-token inspection.

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get as get_route, post as post_route},
};

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post_route(post::register))
        .route("/login", post_route(post::login))
        .merge(
            Router::new()
                .route("/me", get_route(get::me))
                .route("/check", get_route(get::check))
                .route_layer(from_fn(allow_authenticated)),
        )
}
