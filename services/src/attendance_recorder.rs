//! Student check-ins and teacher corrections.

use chrono::{DateTime, Utc};
use db::models::{
    attendance_record::{self, AttendanceStatus},
    enrollment::Model as EnrollmentModel,
    exclusion::Model as ExclusionModel,
    user::{Model as UserModel, Role},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::{info, warn};

use crate::error::{AppError, AppResult, is_unique_violation};
use crate::escalation::{self, Thresholds};
use crate::session_lifecycle::{find_session, resolve_code};

/// Absence category chosen by a teacher when correcting a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AbsenceKind {
    Justified,
    Unjustified,
    /// Absent without a stated reason.
    None,
}

impl AbsenceKind {
    /// Parses a teacher-supplied label. Anything unrecognised is a plain absence.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(AbsenceKind::None)
    }

    pub fn status(self) -> AttendanceStatus {
        match self {
            AbsenceKind::Justified => AttendanceStatus::Justified,
            AbsenceKind::Unjustified => AttendanceStatus::Unjustified,
            AbsenceKind::None => AttendanceStatus::Absent,
        }
    }
}

/// The label a teacher typed, kept verbatim (trimmed), and the category it
/// maps to. Labels like `medical` are stored as-is with status `absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Absence {
    pub kind: AbsenceKind,
    pub label: String,
}

impl Absence {
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return AbsenceKind::None.into();
        }
        Self {
            kind: AbsenceKind::from_label(label),
            label: label.to_owned(),
        }
    }
}

impl From<AbsenceKind> for Absence {
    fn from(kind: AbsenceKind) -> Self {
        Self {
            kind,
            label: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckInReceipt {
    pub record_id: i64,
    pub session_id: i64,
    pub course_id: i64,
}

/// Result of a correction as reported to the teacher. When the correction
/// led to an exclusion, a warning issued alongside it is not reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion_created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion_reason: Option<String>,
    pub message: String,
}

impl From<escalation::Escalation> for CorrectionOutcome {
    fn from(e: escalation::Escalation) -> Self {
        if let Some(exclusion) = e.exclusion {
            return CorrectionOutcome {
                exclusion_created: Some(true),
                exclusion_reason: Some(exclusion.reason),
                message: "Attendance status updated. Student has been excluded from this course."
                    .into(),
                ..Default::default()
            };
        }
        if let Some(warning) = e.warning {
            return CorrectionOutcome {
                warning_created: Some(true),
                warning_message: Some(warning.message),
                message: "Attendance status updated. Warning issued to student.".into(),
                ..Default::default()
            };
        }
        CorrectionOutcome {
            message: "Attendance status updated".into(),
            ..Default::default()
        }
    }
}

/// Marks `student_id` present in the session currently holding `code`.
///
/// Checks run in order: code, student, enrollment, exclusion, duplicate.
/// Present check-ins never trigger escalation.
pub async fn check_in<C>(
    db: &C,
    code: &str,
    student_id: i64,
    now: DateTime<Utc>,
) -> AppResult<CheckInReceipt>
where
    C: ConnectionTrait,
{
    let session = resolve_code(db, code, now).await.inspect_err(|_| {
        warn!(student_id, "check-in with invalid or expired code");
    })?;

    if UserModel::find_with_role(db, student_id, Role::Student)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Student not found"));
    }
    if !EnrollmentModel::is_enrolled(db, session.course_id, student_id).await? {
        warn!(student_id, session_id = session.id, "check-in from student not enrolled");
        return Err(AppError::forbidden("Student not enrolled in this course"));
    }
    if ExclusionModel::active_for(db, student_id, session.course_id)
        .await?
        .is_some()
    {
        warn!(student_id, course_id = session.course_id, "check-in from excluded student");
        return Err(AppError::forbidden(
            "Student is excluded from this course and cannot mark attendance",
        ));
    }

    let inserted = attendance_record::ActiveModel {
        session_id: Set(session.id),
        student_id: Set(student_id),
        status: Set(AttendanceStatus::Present),
        absence_type: Set(None),
        submission_time: Set(now),
        last_modified: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::conflict("Attendance already marked for this session")
        } else {
            AppError::from(e)
        }
    })?;

    info!(student_id, session_id = session.id, record_id = inserted.id, "attendance marked");
    Ok(CheckInReceipt {
        record_id: inserted.id,
        session_id: session.id,
        course_id: session.course_id,
    })
}

/// Sets the student's record for the session to the given absence, creating
/// it if needed, then re-evaluates escalation for the session's course.
pub async fn correct_attendance<C>(
    db: &C,
    thresholds: &Thresholds,
    session_id: i64,
    student_id: i64,
    absence: impl Into<Absence>,
    now: DateTime<Utc>,
) -> AppResult<CorrectionOutcome>
where
    C: ConnectionTrait,
{
    let Absence { kind, label } = absence.into();
    let session = find_session(db, session_id).await?;
    if UserModel::find_with_role(db, student_id, Role::Student)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Student not found"));
    }

    let am = attendance_record::ActiveModel {
        session_id: Set(session.id),
        student_id: Set(student_id),
        status: Set(kind.status()),
        absence_type: Set(Some(label)),
        submission_time: Set(now),
        last_modified: Set(Some(now)),
        ..Default::default()
    };
    let written = attendance_record::Entity::insert(am)
        .on_conflict(
            OnConflict::columns([
                attendance_record::Column::SessionId,
                attendance_record::Column::StudentId,
            ])
            .update_columns([
                attendance_record::Column::Status,
                attendance_record::Column::AbsenceType,
                attendance_record::Column::LastModified,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    if written == 0 {
        return Err(AppError::Internal(DbErr::RecordNotInserted));
    }
    info!(session_id, student_id, status = %kind.status(), "attendance corrected");

    let escalation = escalation::run(db, thresholds, student_id, session.course_id).await?;
    Ok(escalation.into())
}
