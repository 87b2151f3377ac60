use chrono::{DateTime, Utc};
use db::models::session;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Default, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub start_time: String,
    pub expiration_time: String,
    pub attendance_code: Option<String>,
    pub status: String,
    pub room: Option<String>,
    pub time_slot: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<session::Model> for SessionResponse {
    fn from(m: session::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            teacher_id: m.teacher_id,
            start_time: m.start_time.to_rfc3339(),
            expiration_time: m.expiration_time.to_rfc3339(),
            attendance_code: m.attendance_code,
            status: m.status.to_string(),
            room: m.room,
            time_slot: m.time_slot,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(range(min = 1, message = "course_id must be a positive id"))]
    pub course_id: i64,
    #[validate(range(min = 1, message = "teacher_id must be a positive id"))]
    pub teacher_id: i64,
    pub start_time: DateTime<Utc>,
    #[validate(length(max = 64, message = "room must be at most 64 characters"))]
    pub room: Option<String>,
    #[validate(length(max = 32, message = "time_slot must be at most 32 characters"))]
    pub time_slot: Option<String>,
    /// Start the session immediately.
    pub activate: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CorrectAttendanceRequest {
    /// `justified`, `unjustified` or `none`.
    #[validate(length(min = 1, max = 32, message = "absence_type is required"))]
    pub absence_type: String,
}
