use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{make_test_app, seed, send};

#[tokio::test]
async fn history_and_stats_follow_corrections() {
    let (app, db) = make_test_app().await;
    let s = seed(&db).await;

    for (day, absence) in [(3, "justified"), (4, "none")] {
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
        let id = json["data"]["id"].as_i64().unwrap();
        send(
            &app,
            "PUT",
            &format!("/api/sessions/{id}/attendance/{}", s.student.id),
            Some(json!({ "absence_type": absence })),
        )
        .await;
    }

    let (status, json) = send(&app, "GET", &format!("/api/students/{}/attendance", s.student.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["status"], "absent");
    assert_eq!(records[1]["status"], "justified");
    assert_eq!(records[0]["course_code"], "CS101");

    let (status, json) = send(
        &app,
        "GET",
        &format!("/api/students/{}/stats?course_id={}", s.student.id, s.course.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_absences"], 2);
    assert_eq!(json["data"]["justified_absences"], 1);
    assert_eq!(json["data"]["unjustified_absences"], 1);
    assert_eq!(json["data"]["active_warnings"], 0);
    assert_eq!(json["data"]["is_excluded"], false);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let (app, _db) = make_test_app().await;
    let (status, json) = send(&app, "GET", "/api/students/42/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Student not found");
}
