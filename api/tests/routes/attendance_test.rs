use axum::http::StatusCode;
use db::models::{
    exclusion::Model as ExclusionModel,
    user::{Model as UserModel, Role},
};
use serde_json::{Value, json};

use crate::helpers::{make_test_app, seed, send};

/// Creates a session for the seeded course and starts it; returns its code.
async fn started_session(app: &axum::Router, course_id: i64, teacher_id: i64) -> (i64, String) {
    let (_, json) = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": course_id,
            "teacher_id": teacher_id,
            "start_time": "2025-03-03T09:00:00Z",
            "activate": true
        })),
    )
    .await;
    let id = json["data"]["id"].as_i64().unwrap();
    let code = json["data"]["attendance_code"].as_str().unwrap().to_owned();
    (id, code)
}

#[tokio::test]
async fn check_in_marks_present_once() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let (session_id, code) = started_session(&app, s.course.id, s.teacher.id).await;

    let body = json!({ "code": code.to_lowercase(), "student_id": s.student.id });
    let (status, json) = send(&app, "POST", "/api/attendance/check-in", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Attendance marked successfully");
    assert_eq!(json["data"]["session_id"], session_id);
    assert!(json["data"]["record_id"].is_i64());

    let (status, json) = send(&app, "POST", "/api/attendance/check-in", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Attendance already marked for this session");
}

#[tokio::test]
async fn check_in_after_close_is_rejected() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let (session_id, code) = started_session(&app, s.course.id, s.teacher.id).await;
    send(&app, "POST", &format!("/api/sessions/{session_id}/close"), None).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/attendance/check-in",
        Some(json!({ "code": code, "student_id": s.student.id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Invalid or expired attendance code");
}

#[tokio::test]
async fn check_in_rejects_outsiders_and_excluded_students() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let (_, code) = started_session(&app, s.course.id, s.teacher.id).await;

    let outsider = UserModel::create(&db, "Outsider", "out@school.test", Role::Student)
        .await
        .unwrap();
    let (status, json) = send(
        &app,
        "POST",
        "/api/attendance/check-in",
        Some(json!({ "code": code, "student_id": outsider.id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Student not enrolled in this course");

    ExclusionModel::issue(&db, s.student.id, s.course.id, 3, "excluded")
        .await
        .unwrap();
    let (status, json) = send(
        &app,
        "POST",
        "/api/attendance/check-in",
        Some(json!({ "code": code, "student_id": s.student.id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        json["message"],
        "Student is excluded from this course and cannot mark attendance"
    );
    assert_eq!(json["data"]["record_id"], Value::from(0));
}

#[tokio::test]
async fn check_in_validates_the_body() {
    let (app, _db) = make_test_app().await;
    let (status, json) = send(
        &app,
        "POST",
        "/api/attendance/check-in",
        Some(json!({ "code": "", "student_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "code is required");
}
