//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check
//! - `/sessions` → session lifecycle, roster and corrections (teachers)
//! - `/attendance` → code check-in (students)
//! - `/students` → attendance history and statistics
//! - `/admin` → course assignment, warnings and exclusions

use crate::routes::{
    admin::admin_routes, attendance::attendance_routes, health::health_routes,
    sessions::sessions_routes, students::students_routes,
};
use axum::Router;
use util::state::AppState;

pub mod admin;
pub mod attendance;
pub mod common;
pub mod health;
pub mod sessions;
pub mod students;

/// Builds the application router with `app_state` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/sessions", sessions_routes())
        .nest("/attendance", attendance_routes())
        .nest("/students", students_routes())
        .nest("/admin", admin_routes())
        .with_state(app_state)
}
