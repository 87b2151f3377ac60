use api::routes::routes;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use db::models::{
    course::Model as CourseModel,
    enrollment::Model as EnrollmentModel,
    teacher_course::Model as TeacherCourseModel,
    user::{Model as UserModel, Role},
};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

/// Router over a fresh in-memory database, plus a handle on that database.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let router = Router::new().nest("/api", routes(AppState::new(db.clone())));
    (router, db)
}

/// One teacher assigned to one course, with one enrolled student.
pub struct Seed {
    pub teacher: UserModel,
    pub student: UserModel,
    pub course: CourseModel,
}

pub async fn seed(db: &DatabaseConnection) -> Seed {
    let teacher = UserModel::create(db, "Grace Hopper", "grace@school.test", Role::Teacher)
        .await
        .unwrap();
    let student = UserModel::create(db, "Alan Turing", "alan@school.test", Role::Student)
        .await
        .unwrap();
    let course = CourseModel::create(db, "CS101", "Introduction to Computing")
        .await
        .unwrap();
    TeacherCourseModel::assign(db, teacher.id, course.id).await.unwrap();
    EnrollmentModel::enroll(db, course.id, student.id).await.unwrap();
    Seed {
        teacher,
        student,
        course,
    }
}

pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Sends one request through a clone of `app`; returns status and JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request(method, uri, body))
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}
