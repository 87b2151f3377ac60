use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{make_test_app, seed, send};

#[tokio::test]
async fn create_start_and_close_a_session() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": s.course.id,
            "teacher_id": s.teacher.id,
            "start_time": "2025-03-03T09:00:00Z",
            "room": "B12"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "scheduled");
    assert_eq!(json["data"]["attendance_code"], Value::Null);
    assert_eq!(json["data"]["expiration_time"], "2025-03-03T11:00:00+00:00");
    let id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = send(&app, "POST", &format!("/api/sessions/{id}/start"), None).await;
    assert_eq!(status, StatusCode::OK);
    let code = json["data"]["code"].as_str().unwrap().to_owned();
    assert_eq!(code.len(), 6);

    let (_, json) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["attendance_code"], code);

    let (status, json) = send(&app, "POST", &format!("/api/sessions/{id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["attendance_code"], Value::Null);

    let (status, json) = send(&app, "POST", &format!("/api/sessions/{id}/start"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Session already completed");
}

#[tokio::test]
async fn create_session_validation_and_authorization() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": s.course.id,
            "teacher_id": 0,
            "start_time": "2025-03-03T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "teacher_id must be a positive id");

    let (status, _) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": s.course.id,
            "teacher_id": s.student.id,
            "start_time": "2025-03-03T09:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_activate_returns_an_active_session() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": s.course.id,
            "teacher_id": s.teacher.id,
            "start_time": "2025-03-03T09:00:00Z",
            "activate": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "active");
    assert!(json["data"]["attendance_code"].is_string());
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (app, _db) = make_test_app().await;
    for (method, uri) in [
        ("GET", "/api/sessions/999"),
        ("POST", "/api/sessions/999/start"),
        ("POST", "/api/sessions/999/close"),
        ("GET", "/api/sessions/999/attendance"),
    ] {
        let (status, json) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(json["message"], "Session not found");
    }
}

#[tokio::test]
async fn corrections_escalate_and_show_on_the_roster() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;

    let mut ids = Vec::new();
    for day in 3..6 {
        let (_, json) = send(
            &app,
            "POST",
            "/api/sessions",
            Some(json!({
                "course_id": s.course.id,
                "teacher_id": s.teacher.id,
                "start_time": format!("2025-03-0{day}T09:00:00Z")
            })),
        )
        .await;
        ids.push(json["data"]["id"].as_i64().unwrap());
    }

    let mut responses = Vec::new();
    for id in &ids {
        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/sessions/{id}/attendance/{}", s.student.id),
            Some(json!({ "absence_type": "Unjustified" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        responses.push(json);
    }

    assert_eq!(responses[0]["data"]["message"], "Attendance status updated");
    assert!(responses[0]["data"].get("warning_created").is_none());
    assert_eq!(responses[1]["data"]["warning_created"], true);
    assert_eq!(responses[2]["data"]["exclusion_created"], true);
    assert!(responses[2]["data"].get("warning_created").is_none());
    assert_eq!(
        responses[2]["message"],
        "Attendance status updated. Student has been excluded from this course."
    );

    let (status, json) = send(&app, "GET", &format!("/api/sessions/{}/attendance", ids[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["course_code"], "CS101");
    let students = json["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["status"], "unjustified");
    assert_eq!(students[0]["absence_type"], "Unjustified");
}

#[tokio::test]
async fn correction_requires_an_absence_type() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let (_, json) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": s.course.id,
            "teacher_id": s.teacher.id,
            "start_time": "2025-03-03T09:00:00Z"
        })),
    )
    .await;
    let id = json["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/attendance/{}", s.student.id),
        Some(json!({ "absence_type": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roster_shows_the_label_given_on_correction() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;
    let (_, json) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({
            "course_id": s.course.id,
            "teacher_id": s.teacher.id,
            "start_time": "2025-03-03T09:00:00Z"
        })),
    )
    .await;
    let id = json["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/attendance/{}", s.student.id),
        Some(json!({ "absence_type": "family" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "GET", &format!("/api/sessions/{id}/attendance"), None).await;
    let students = json["data"]["students"].as_array().unwrap();
    assert_eq!(students[0]["status"], "absent");
    assert_eq!(students[0]["absence_type"], "family");
}
