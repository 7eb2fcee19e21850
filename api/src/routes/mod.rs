//! HTTP route definitions.
//!
//! All routes are nested under `/api`. Guards are attached per route
//! group with `route_layer`, so authorization is decided before any
//! handler body runs.

pub mod auth;
pub mod classrooms;
pub mod health;
pub mod me;

use axum::{Router, middleware::from_fn};

use crate::auth::guards::allow_authenticated;
use crate::auth::middleware::log_request;
use crate::state::AppState;

/// Builds the complete application router.
pub fn routes(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes())
        .nest(
            "/classrooms",
            classrooms::classroom_routes(app_state.clone()),
        )
        .nest(
            "/me",
            me::me_routes().route_layer(from_fn(allow_authenticated)),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(from_fn(log_request))
        .with_state(app_state)
}
