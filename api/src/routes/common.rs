//! Helpers shared by every route group.

use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::AppError;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Every response handler in this crate returns this shape.
pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

/// Joins the messages of all failed field validations.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a core failure onto its status code and error envelope.
pub fn error_response<T>(err: AppError) -> ApiResult<T>
where
    T: Serialize + Default,
{
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, Json(ApiResponse::error(err.to_string())))
}

pub fn bad_request<T>(message: impl Into<String>) -> ApiResult<T>
where
    T: Serialize + Default,
{
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}
