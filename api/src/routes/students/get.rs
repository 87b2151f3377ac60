use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use services::reports::{self, StudentRecord, StudentStats};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, error_response};

/// GET /api/students/{student_id}/attendance
///
/// The student's attendance records, newest session first.
pub async fn get_student_attendance(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> ApiResult<Vec<StudentRecord>> {
    match reports::student_records(state.db(), student_id).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(records, "Attendance records retrieved")),
        ),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub course_id: Option<i64>,
}

/// GET /api/students/{student_id}/stats?course_id=
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "student_id": 7,
///     "course_id": null,
///     "sessions_attended": 12,
///     "total_absences": 3,
///     "justified_absences": 1,
///     "unjustified_absences": 2,
///     "active_warnings": 1,
///     "is_excluded": false
///   },
///   "message": "Attendance statistics retrieved"
/// }
/// ```
pub async fn get_student_stats(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<StudentStats> {
    match reports::student_stats(state.db(), student_id, query.course_id).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Attendance statistics retrieved")),
        ),
        Err(e) => error_response(e),
    }
}
