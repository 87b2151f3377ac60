use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

mod common;
mod get;
mod post;
mod put;

pub use common::{CorrectAttendanceRequest, CreateSessionRequest, SessionResponse};
pub use get::{get_session, get_session_attendance};
pub use post::{close_session, create_session, start_session};
pub use put::correct_attendance;

/// Builds the `/sessions` route group.
pub fn sessions_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{session_id}", get(get_session))
        .route("/{session_id}/start", post(start_session))
        .route("/{session_id}/close", post(close_session))
        .route("/{session_id}/attendance", get(get_session_attendance))
        .route(
            "/{session_id}/attendance/{student_id}",
            put(correct_attendance),
        )
}
