//! Classroom routes and everything nested under a classroom.

pub mod announcements;
pub mod assignments;
pub mod common;
pub mod delete;
pub mod enrollments;
pub mod get;
pub mod materials;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get as get_route, post as post_route, put as put_route},
};

use crate::auth::guards::{
    allow_authenticated, require_classroom_member, require_classroom_owner, require_teacher,
};
use crate::state::AppState;

pub fn classroom_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post_route(post::create))
        .route_layer(from_fn(require_teacher))
        .merge(
            Router::new()
                .route("/", get_route(get::list))
                .route_layer(from_fn(allow_authenticated)),
        )
        .merge(
            Router::new()
                .route("/{classroom_id}", get_route(get::detail))
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    require_classroom_member,
                )),
        )
        .merge(
            Router::new()
                .route(
                    "/{classroom_id}",
                    put_route(put::edit).delete(delete::remove),
                )
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    require_classroom_owner,
                )),
        )
        .nest(
            "/{classroom_id}/enrollments",
            enrollments::enrollment_routes(app_state.clone()),
        )
        .nest(
            "/{classroom_id}/assignments",
            assignments::assignment_routes(app_state.clone()),
        )
        .nest(
            "/{classroom_id}/materials",
            materials::material_routes(app_state.clone()),
        )
        .nest(
            "/{classroom_id}/announcements",
            announcements::announcement_routes(app_state),
        )
}
