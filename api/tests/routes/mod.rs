mod admin_test;
mod attendance_test;
mod health_test;
mod middleware_test;
mod sessions_test;
mod students_test;
