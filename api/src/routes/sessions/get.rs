use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use services::{reports, reports::SessionRoster, session_lifecycle};
use util::state::AppState;

use super::common::SessionResponse;
use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, error_response};

/// GET /api/sessions/{session_id}
///
/// - `200 OK` with the session
/// - `404 Not Found` if the session does not exist
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<SessionResponse> {
    match session_lifecycle::find_session(state.db(), session_id).await {
        Ok(s) => (
            StatusCode::OK,
            Json(ApiResponse::success(SessionResponse::from(s), "Session retrieved")),
        ),
        Err(e) => error_response(e),
    }
}

/// GET /api/sessions/{session_id}/attendance
///
/// Every student enrolled in the session's course with their status. Students
/// without a record are listed as `absent` with absence type `none`.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "session_id": 4,
///     "course_id": 1,
///     "course_code": "CS101",
///     "course_name": "Introduction to Computing",
///     "students": [
///       { "student_id": 7, "full_name": "Alan Turing", "email": "alan@school.test",
///         "status": "present", "absence_type": "none" }
///     ]
///   },
///   "message": "Session attendance retrieved"
/// }
/// ```
pub async fn get_session_attendance(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<SessionRoster> {
    match reports::session_roster(state.db(), session_id).await {
        Ok(roster) => (
            StatusCode::OK,
            Json(ApiResponse::success(roster, "Session attendance retrieved")),
        ),
        Err(e) => error_response(e),
    }
}
