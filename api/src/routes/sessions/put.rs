use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::attendance_recorder::{self, Absence, CorrectionOutcome};
use services::escalation::Thresholds;
use util::state::AppState;
use validator::Validate;

use super::common::CorrectAttendanceRequest;
use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, bad_request, error_response, format_validation_errors};

/// PUT /api/sessions/{session_id}/attendance/{student_id}
///
/// Records the student as absent and re-evaluates warnings and exclusions for
/// the course. `justified` and `unjustified` set the matching status; any other
/// label is stored verbatim with status `absent`.
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "exclusion_created": true,
///     "exclusion_reason": "Student has 3 unjustified absences (threshold: 3)",
///     "message": "Attendance status updated. Student has been excluded from this course."
///   },
///   "message": "Attendance status updated. Student has been excluded from this course."
/// }
/// ```
pub async fn correct_attendance(
    State(state): State<AppState>,
    Path((session_id, student_id)): Path<(i64, i64)>,
    Json(req): Json<CorrectAttendanceRequest>,
) -> ApiResult<CorrectionOutcome> {
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    match attendance_recorder::correct_attendance(
        state.db(),
        &Thresholds::default(),
        session_id,
        student_id,
        Absence::parse(&req.absence_type),
        Utc::now(),
    )
    .await
    {
        Ok(outcome) => {
            let message = outcome.message.clone();
            (StatusCode::OK, Json(ApiResponse::success(outcome, message)))
        }
        Err(e) => error_response(e),
    }
}
