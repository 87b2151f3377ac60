use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{exclusion, warning};
use services::escalation_admin;
use util::state::AppState;

use super::common::SetActiveRequest;
use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, error_response};

/// PUT /api/admin/warnings/{warning_id}
///
/// ### Request Body
/// ```json
/// { "is_active": false }
/// ```
///
/// - `404 Not Found` if the warning does not exist
/// - `409 Conflict` when reactivating while another warning is active for the same student and course
pub async fn set_warning_active(
    State(state): State<AppState>,
    Path(warning_id): Path<i64>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Option<warning::Model>> {
    match escalation_admin::set_warning_active(state.db(), warning_id, req.is_active).await {
        Ok(w) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(w), "Warning updated")),
        ),
        Err(e) => error_response(e),
    }
}

/// PUT /api/admin/exclusions/{exclusion_id}
///
/// Lifting an exclusion lets the student check in to the course again.
pub async fn set_exclusion_active(
    State(state): State<AppState>,
    Path(exclusion_id): Path<i64>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Option<exclusion::Model>> {
    match escalation_admin::set_exclusion_active(state.db(), exclusion_id, req.is_active).await {
        Ok(e) => (
            StatusCode::OK,
            Json(ApiResponse::success(Some(e), "Exclusion updated")),
        ),
        Err(e) => error_response(e),
    }
}
