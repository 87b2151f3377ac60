use axum::{Router, routing::get};
use util::state::AppState;

mod get;

pub use get::{StatsQuery, get_student_attendance, get_student_stats};

/// Builds the `/students` route group.
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/{student_id}/attendance", get(get_student_attendance))
        .route("/{student_id}/stats", get(get_student_stats))
}
