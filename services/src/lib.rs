//! Attendance core: session lifecycle, scheduling, check-in recording and the
//! absence escalation engine.
//!
//! Every operation takes a sea-orm [`ConnectionTrait`](sea_orm::ConnectionTrait)
//! and runs to completion against it. Time-dependent operations take `now`
//! explicitly.

pub mod attendance_recorder;
pub mod error;
pub mod escalation;
pub mod escalation_admin;
pub mod reports;
pub mod schedule;
pub mod session_lifecycle;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{AppError, AppResult};
