use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Deserialize;
use services::attendance_recorder::{self, CheckInReceipt};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, bad_request, error_response, format_validation_errors};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 16, message = "code is required"))]
    pub code: String,
    #[validate(range(min = 1, message = "student_id must be a positive id"))]
    pub student_id: i64,
}

/// POST /api/attendance/check-in
///
/// Marks a student present using the code shown by the teacher. The code is
/// case-insensitive.
///
/// ### Request Body
/// ```json
/// { "code": "k3x9qz", "student_id": 7 }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ "record_id", "session_id", "course_id" }`
/// - `403 Forbidden` if the student is not enrolled or is excluded from the course
/// - `404 Not Found` for an invalid or expired code, or an unknown student
/// - `409 Conflict` if the student already checked in to this session
pub async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> ApiResult<CheckInReceipt> {
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    match attendance_recorder::check_in(state.db(), &req.code, req.student_id, Utc::now()).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(receipt, "Attendance marked successfully")),
        ),
        Err(e) => error_response(e),
    }
}
