use axum::http::StatusCode;
use db::models::{
    course::Model as CourseModel,
    warning::Model as WarningModel,
};
use serde_json::json;

use crate::helpers::{make_test_app, seed, send};

#[tokio::test]
async fn assignment_schedules_four_sessions_per_course() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let other = CourseModel::create(&db, "MA101", "Algebra").await.unwrap();

    let (status, json) = send(
        &app,
        "POST",
        "/api/admin/assignments",
        Some(json!({ "teacher_id": s.teacher.id, "course_ids": [s.course.id, other.id] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "2 course(s) assigned successfully");
    assert_eq!(json["data"]["sessions_created"], 8);
    assert_eq!(json["data"]["time_slot"], "08:00-09:00");
}

#[tokio::test]
async fn assignment_with_unknown_course_writes_nothing() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/admin/assignments",
        Some(json!({ "teacher_id": s.teacher.id, "course_ids": [999] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Course not found");
    assert_eq!(json["data"]["sessions_created"], 0);
}

#[tokio::test]
async fn warnings_can_be_listed_and_lifted() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let w = WarningModel::issue(&db, s.student.id, s.course.id, 2, "two absences")
        .await
        .unwrap();

    let (status, json) = send(
        &app,
        "GET",
        &format!("/api/admin/warnings?student_id={}&active_only=true", s.student.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["message"], "two absences");

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/admin/warnings/{}", w.id),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["is_active"], false);

    let (_, json) = send(&app, "GET", "/api/admin/warnings?active_only=true", None).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_exclusion_is_not_found() {
    let (app, _db) = make_test_app().await;
    let (status, json) = send(
        &app,
        "PUT",
        "/api/admin/exclusions/7",
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"], serde_json::Value::Null);

    let (status, json) = send(&app, "GET", "/api/admin/exclusions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
}
