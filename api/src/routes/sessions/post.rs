use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::session_lifecycle::{self, CreateSession, StartedSession};
use util::state::AppState;
use validator::Validate;

use super::common::{CreateSessionRequest, SessionResponse};
use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, bad_request, error_response, format_validation_errors};

/// POST /api/sessions
///
/// Creates a session for a teacher on one of their assigned courses.
///
/// ### Request Body
/// ```json
/// {
///   "course_id": 1,
///   "teacher_id": 2,
///   "start_time": "2025-03-03T09:00:00Z",
///   "room": "B12",
///   "time_slot": "09:00-10:00",
///   "activate": false
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the session (`scheduled`, or `active` with a code when `activate` is set)
/// - `400 Bad Request` on invalid input
/// - `403 Forbidden` if the teacher is not assigned to the course
/// - `404 Not Found` if the teacher or course does not exist
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> ApiResult<SessionResponse> {
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    let create = CreateSession {
        course_id: req.course_id,
        teacher_id: req.teacher_id,
        start_time: req.start_time,
        room: req.room,
        time_slot: req.time_slot,
        activate: req.activate.unwrap_or(false),
    };

    match session_lifecycle::create_session(state.db(), create, Utc::now()).await {
        Ok(s) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(SessionResponse::from(s), "Session created")),
        ),
        Err(e) => error_response(e),
    }
}

/// POST /api/sessions/{session_id}/start
///
/// Issues a fresh six-character code valid for two hours. Starting an active
/// session rotates its code.
///
/// ```json
/// {
///   "success": true,
///   "data": { "code": "K3X9QZ", "expires_at": "2025-03-03T11:00:00Z" },
///   "message": "Session started"
/// }
/// ```
///
/// - `404 Not Found` if the session does not exist
/// - `409 Conflict` if the session is already completed
pub async fn start_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<StartedSession> {
    match session_lifecycle::start_session(state.db(), session_id, Utc::now()).await {
        Ok(started) => (
            StatusCode::OK,
            Json(ApiResponse::success(started, "Session started")),
        ),
        Err(e) => error_response(e),
    }
}

/// POST /api/sessions/{session_id}/close
///
/// Completes the session and clears its code. Closing twice is harmless.
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> ApiResult<SessionResponse> {
    match session_lifecycle::close_session(state.db(), session_id, Utc::now()).await {
        Ok(s) => (
            StatusCode::OK,
            Json(ApiResponse::success(SessionResponse::from(s), "Session closed")),
        ),
        Err(e) => error_response(e),
    }
}
