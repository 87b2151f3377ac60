use axum::{Router, routing::post};
use util::state::AppState;

mod post;

pub use post::{CheckInRequest, check_in};

/// Builds the `/attendance` route group.
pub fn attendance_routes() -> Router<AppState> {
    Router::new().route("/check-in", post(check_in))
}
