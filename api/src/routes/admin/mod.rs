use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

mod common;
mod get;
mod post;
mod put;

pub use common::{AssignCoursesRequest, SetActiveRequest};
pub use get::{list_exclusions, list_warnings};
pub use post::assign_courses;
pub use put::{set_exclusion_active, set_warning_active};

/// Builds the `/admin` route group.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", post(assign_courses))
        .route("/warnings", get(list_warnings))
        .route("/warnings/{warning_id}", put(set_warning_active))
        .route("/exclusions", get(list_exclusions))
        .route("/exclusions/{exclusion_id}", put(set_exclusion_active))
}
