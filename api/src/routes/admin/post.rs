use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use services::schedule::{self, AssignmentOutcome, FixedSlotTable};
use util::state::AppState;
use validator::Validate;

use super::common::AssignCoursesRequest;
use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, bad_request, error_response, format_validation_errors};

/// POST /api/admin/assignments
///
/// Replaces the teacher's course assignments and schedules four weeks of
/// sessions (Mon, Wed, Fri, Mon) for each course, starting the Monday on or
/// after today, in the teacher's hourly slot.
///
/// ### Request Body
/// ```json
/// { "teacher_id": 2, "course_ids": [1, 3] }
/// ```
///
/// ### Responses
/// - `201 Created` with the assigned courses, slot and number of sessions created
/// - `404 Not Found` if the teacher or any course does not exist (nothing is written)
pub async fn assign_courses(
    State(state): State<AppState>,
    Json(req): Json<AssignCoursesRequest>,
) -> ApiResult<AssignmentOutcome> {
    if let Err(validation_errors) = req.validate() {
        return bad_request(format_validation_errors(&validation_errors));
    }

    match schedule::bulk_assign_sessions(
        state.db(),
        &FixedSlotTable::default(),
        req.teacher_id,
        &req.course_ids,
        Utc::now(),
    )
    .await
    {
        Ok(outcome) => {
            let message = format!(
                "{} course(s) assigned successfully",
                outcome.course_ids.len()
            );
            (StatusCode::CREATED, Json(ApiResponse::success(outcome, message)))
        }
        Err(e) => error_response(e),
    }
}
