//! Fixtures shared by the core's unit tests.

use chrono::{DateTime, TimeZone, Utc};
use db::models::{
    course::Model as CourseModel,
    enrollment::Model as EnrollmentModel,
    session::{self, NewSession},
    teacher_course::Model as TeacherCourseModel,
    user::{Model as UserModel, Role},
};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;

/// A course with one assigned teacher and one enrolled student.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub teacher: UserModel,
    pub student: UserModel,
    pub course: CourseModel,
}

/// Monday 2025-03-03 09:00 UTC.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

pub async fn fixture() -> Fixture {
    let db = setup_test_db().await;
    let teacher = UserModel::create(&db, "Grace Hopper", "grace@school.test", Role::Teacher)
        .await
        .unwrap();
    let student = UserModel::create(&db, "Alan Turing", "alan@school.test", Role::Student)
        .await
        .unwrap();
    let course = CourseModel::create(&db, "CS101", "Introduction to Computing")
        .await
        .unwrap();
    TeacherCourseModel::assign(&db, teacher.id, course.id).await.unwrap();
    EnrollmentModel::enroll(&db, course.id, student.id).await.unwrap();

    Fixture {
        db,
        teacher,
        student,
        course,
    }
}

impl Fixture {
    pub async fn scheduled_session(&self, start_time: DateTime<Utc>) -> session::Model {
        session::Model::create(
            &self.db,
            NewSession {
                course_id: self.course.id,
                teacher_id: self.teacher.id,
                start_time,
                room: Some("Lab 2".into()),
                time_slot: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn another_student(&self, email: &str) -> UserModel {
        let s = UserModel::create(&self.db, "Another Student", email, Role::Student)
            .await
            .unwrap();
        EnrollmentModel::enroll(&self.db, self.course.id, s.id)
            .await
            .unwrap();
        s
    }
}
