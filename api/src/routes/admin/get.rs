use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use db::filters::EscalationFilter;
use db::models::{exclusion, warning};
use services::escalation_admin;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{ApiResult, error_response};

/// GET /api/admin/warnings?student_id=&course_id=&active_only=
///
/// Newest first.
pub async fn list_warnings(
    State(state): State<AppState>,
    Query(filter): Query<EscalationFilter>,
) -> ApiResult<Vec<warning::Model>> {
    match escalation_admin::list_warnings(state.db(), &filter).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Warnings retrieved")),
        ),
        Err(e) => error_response(e),
    }
}

/// GET /api/admin/exclusions?student_id=&course_id=&active_only=
pub async fn list_exclusions(
    State(state): State<AppState>,
    Query(filter): Query<EscalationFilter>,
) -> ApiResult<Vec<exclusion::Model>> {
    match escalation_admin::list_exclusions(state.db(), &filter).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Exclusions retrieved")),
        ),
        Err(e) => error_response(e),
    }
}
