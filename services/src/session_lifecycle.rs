//! Session state machine: `Scheduled -> Active -> Completed`.
//!
//! Starting a session issues a fresh six-character code and opens a two hour
//! check-in window from the moment of the start. Starting an already active
//! session rotates both. `Completed` is terminal.

use chrono::{DateTime, Utc};
use db::models::{
    course,
    session::{self, NewSession, SessionStatus},
    teacher_course::Model as TeacherCourseModel,
    user::{Model as UserModel, Role},
};
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

pub const CODE_LENGTH: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Attempts at drawing a code no other active session holds.
const CODE_ATTEMPTS: usize = 8;

pub const INVALID_CODE: &str = "Invalid or expired attendance code";

/// Code and window end handed out by [`start_session`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StartedSession {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateSession {
    pub course_id: i64,
    pub teacher_id: i64,
    pub start_time: DateTime<Utc>,
    pub room: Option<String>,
    pub time_slot: Option<String>,
    /// Start the session straight away.
    pub activate: bool,
}

/// Random code over `A-Z0-9`.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Uppercases and trims a code typed by a student.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

async fn unused_code<C>(db: &C) -> AppResult<String>
where
    C: ConnectionTrait,
{
    let mut code = generate_code();
    for _ in 1..CODE_ATTEMPTS {
        let taken = session::Entity::find()
            .filter(session::Column::Status.eq(SessionStatus::Active))
            .filter(session::Column::AttendanceCode.eq(code.as_str()))
            .one(db)
            .await?
            .is_some();
        if !taken {
            break;
        }
        code = generate_code();
    }
    Ok(code)
}

pub async fn find_session<C>(db: &C, session_id: i64) -> AppResult<session::Model>
where
    C: ConnectionTrait,
{
    session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found"))
}

/// Creates a session for a teacher on one of their courses.
pub async fn create_session<C>(
    db: &C,
    req: CreateSession,
    now: DateTime<Utc>,
) -> AppResult<session::Model>
where
    C: ConnectionTrait,
{
    if UserModel::find_with_role(db, req.teacher_id, Role::Teacher)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Teacher not found"));
    }
    if course::Entity::find_by_id(req.course_id).one(db).await?.is_none() {
        return Err(AppError::not_found("Course not found"));
    }
    if !TeacherCourseModel::is_assigned(db, req.teacher_id, req.course_id).await? {
        return Err(AppError::forbidden("Teacher is not assigned to this course"));
    }

    let created = session::Model::create(
        db,
        NewSession {
            course_id: req.course_id,
            teacher_id: req.teacher_id,
            start_time: req.start_time,
            room: req.room,
            time_slot: req.time_slot,
        },
    )
    .await?;
    info!(session_id = created.id, course_id = created.course_id, "session created");

    if !req.activate {
        return Ok(created);
    }
    start_session(db, created.id, now).await?;
    find_session(db, created.id).await
}

/// Moves a session to `Active` with a new code expiring two hours from `now`.
pub async fn start_session<C>(
    db: &C,
    session_id: i64,
    now: DateTime<Utc>,
) -> AppResult<StartedSession>
where
    C: ConnectionTrait,
{
    let existing = find_session(db, session_id).await?;
    if existing.status == SessionStatus::Completed {
        warn!(session_id, "refusing to start a completed session");
        return Err(AppError::conflict("Session already completed"));
    }

    let code = unused_code(db).await?;
    let expires_at = now + session::window();

    // The status guard keeps a concurrent close from being undone.
    let res = session::Entity::update_many()
        .col_expr(session::Column::Status, Expr::value(SessionStatus::Active))
        .col_expr(session::Column::AttendanceCode, Expr::value(Some(code.clone())))
        .col_expr(session::Column::ExpirationTime, Expr::value(expires_at))
        .col_expr(session::Column::UpdatedAt, Expr::value(now))
        .filter(session::Column::Id.eq(session_id))
        .filter(session::Column::Status.ne(SessionStatus::Completed))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(AppError::conflict("Session already completed"));
    }

    info!(session_id, %expires_at, "session started");
    Ok(StartedSession { code, expires_at })
}

/// Moves a session to `Completed` and clears its code. Closing a completed
/// session again just refreshes `updated_at`.
pub async fn close_session<C>(
    db: &C,
    session_id: i64,
    now: DateTime<Utc>,
) -> AppResult<session::Model>
where
    C: ConnectionTrait,
{
    let existing = find_session(db, session_id).await?;
    let mut am: session::ActiveModel = existing.into();
    am.status = Set(SessionStatus::Completed);
    am.attendance_code = Set(None);
    am.updated_at = Set(now);
    let closed = am.update(db).await?;

    info!(session_id, "session closed");
    Ok(closed)
}

/// Finds the session currently accepting check-ins under `code`.
///
/// A wrong code, a session that is not active and an expired window are
/// indistinguishable to the caller.
pub async fn resolve_code<C>(db: &C, code: &str, now: DateTime<Utc>) -> AppResult<session::Model>
where
    C: ConnectionTrait,
{
    let code = normalize_code(code);
    if code.len() != CODE_LENGTH {
        return Err(AppError::not_found(INVALID_CODE));
    }

    let candidates = session::Entity::find()
        .filter(session::Column::AttendanceCode.eq(code))
        .filter(session::Column::Status.eq(SessionStatus::Active))
        .all(db)
        .await?;

    candidates
        .into_iter()
        .find(|s| s.accepts_check_in(now))
        .ok_or_else(|| AppError::not_found(INVALID_CODE))
}
