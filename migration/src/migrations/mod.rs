pub mod m202510010001_create_users;
pub mod m202510010002_create_courses;
pub mod m202510010003_create_sessions;
pub mod m202510010004_create_attendance_records;
pub mod m202510010005_create_escalations;
