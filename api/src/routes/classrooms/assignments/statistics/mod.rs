pub mod get;

use axum::{Router, routing::get as get_route};

use crate::state::AppState;

pub fn statistics_routes() -> Router<AppState> {
    Router::new().route("/", get_route(get::statistics))
}
