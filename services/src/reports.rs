//! Read-side views: the roster of a session and a student's history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use db::filters::EscalationFilter;
use db::models::{
    attendance_record::{self, AttendanceStatus},
    course, enrollment,
    exclusion::Model as ExclusionModel,
    session,
    user::{self, Model as UserModel, Role},
    warning::Model as WarningModel,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::session_lifecycle::find_session;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub student_id: i64,
    pub full_name: String,
    pub email: String,
    pub status: String,
    pub absence_type: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionRoster {
    pub session_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub students: Vec<RosterEntry>,
}

/// Every enrolled student with their status in the session, sorted by name.
/// Students with no record show as `absent` / `none`.
pub async fn session_roster<C>(db: &C, session_id: i64) -> AppResult<SessionRoster>
where
    C: ConnectionTrait,
{
    let session = find_session(db, session_id).await?;
    let course = course::Entity::find_by_id(session.course_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

    let records: HashMap<i64, attendance_record::Model> = attendance_record::Entity::find()
        .filter(attendance_record::Column::SessionId.eq(session.id))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.student_id, r))
        .collect();

    let mut students: Vec<RosterEntry> = enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(course.id))
        .find_also_related(user::Entity)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(_, student)| student)
        .map(|student| {
            let record = records.get(&student.id);
            RosterEntry {
                student_id: student.id,
                full_name: student.full_name,
                email: student.email,
                status: record
                    .map(|r| r.status.to_string())
                    .unwrap_or_else(|| AttendanceStatus::Absent.to_string()),
                absence_type: record
                    .and_then(|r| r.absence_type.clone())
                    .unwrap_or_else(|| "none".into()),
            }
        })
        .collect();
    students.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.student_id.cmp(&b.student_id)));

    Ok(SessionRoster {
        session_id: session.id,
        course_id: course.id,
        course_code: course.code,
        course_name: course.name,
        students,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub record_id: i64,
    pub session_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub session_date: DateTime<Utc>,
    pub status: AttendanceStatus,
    pub absence_type: Option<String>,
    pub submission_time: DateTime<Utc>,
    pub last_modified: Option<DateTime<Utc>>,
}

async fn require_student<C>(db: &C, student_id: i64) -> AppResult<UserModel>
where
    C: ConnectionTrait,
{
    UserModel::find_with_role(db, student_id, Role::Student)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))
}

async fn records_with_sessions<C>(
    db: &C,
    student_id: i64,
    course_id: Option<i64>,
) -> AppResult<Vec<(attendance_record::Model, session::Model)>>
where
    C: ConnectionTrait,
{
    let mut query = attendance_record::Entity::find()
        .find_also_related(session::Entity)
        .filter(attendance_record::Column::StudentId.eq(student_id));
    if let Some(course_id) = course_id {
        query = query.filter(session::Column::CourseId.eq(course_id));
    }

    let rows = query.all(db).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(r, s)| s.map(|s| (r, s)))
        .collect())
}

/// All of a student's records, newest session first.
pub async fn student_records<C>(db: &C, student_id: i64) -> AppResult<Vec<StudentRecord>>
where
    C: ConnectionTrait,
{
    require_student(db, student_id).await?;
    let mut rows = records_with_sessions(db, student_id, None).await?;
    rows.sort_by(|(ra, sa), (rb, sb)| {
        sb.start_time
            .cmp(&sa.start_time)
            .then(rb.id.cmp(&ra.id))
    });

    let courses: HashMap<i64, course::Model> = course::Entity::find()
        .filter(course::Column::Id.is_in(rows.iter().map(|(_, s)| s.course_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(rows
        .into_iter()
        .map(|(record, session)| {
            let (course_code, course_name) = courses
                .get(&session.course_id)
                .map(|c| (c.code.clone(), c.name.clone()))
                .unwrap_or_default();
            StudentRecord {
                record_id: record.id,
                session_id: session.id,
                course_id: session.course_id,
                course_code,
                course_name,
                session_date: session.start_time,
                status: record.status,
                absence_type: record.absence_type,
                submission_time: record.submission_time,
                last_modified: record.last_modified,
            }
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentStats {
    pub student_id: i64,
    pub course_id: Option<i64>,
    pub sessions_attended: u64,
    pub total_absences: u64,
    pub justified_absences: u64,
    /// Includes bare `absent` records.
    pub unjustified_absences: u64,
    pub active_warnings: u64,
    pub is_excluded: bool,
}

/// Attendance totals for a student, across all courses or within one.
pub async fn student_stats<C>(
    db: &C,
    student_id: i64,
    course_id: Option<i64>,
) -> AppResult<StudentStats>
where
    C: ConnectionTrait,
{
    require_student(db, student_id).await?;

    let mut stats = StudentStats {
        student_id,
        course_id,
        ..Default::default()
    };
    for (record, _) in records_with_sessions(db, student_id, course_id).await? {
        match record.status {
            AttendanceStatus::Present => stats.sessions_attended += 1,
            AttendanceStatus::Justified => stats.justified_absences += 1,
            AttendanceStatus::Unjustified | AttendanceStatus::Absent => {
                stats.unjustified_absences += 1
            }
        }
    }
    stats.total_absences = stats.justified_absences + stats.unjustified_absences;

    let mut filter = EscalationFilter::new().with_student(student_id).active_only();
    filter.course_id = course_id;
    stats.active_warnings = WarningModel::list(db, &filter).await?.len() as u64;
    stats.is_excluded = !ExclusionModel::list(db, &filter).await?.is_empty();

    Ok(stats)
}
