//! Absence escalation: turns a student's per-course absence counts into
//! warnings and exclusions.
//!
//! Evaluation runs after every attendance mutation made by a teacher. It only
//! ever creates records; lifting a warning or exclusion is left to an
//! administrator.

use db::models::{
    attendance_record::{self, AttendanceStatus},
    exclusion::Model as ExclusionModel,
    session,
    warning::Model as WarningModel,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait,
};
use serde::Serialize;
use tracing::info;

use crate::error::{AppResult, is_unique_violation};

/// Absence counts of one student in one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AbsenceCounts {
    /// `Unjustified` and bare `Absent` records.
    pub unjustified: u64,
    pub justified: u64,
}

impl AbsenceCounts {
    pub fn total(&self) -> u64 {
        self.unjustified + self.justified
    }
}

/// Counts at which a warning or an exclusion is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warn_unjustified: u64,
    pub warn_justified: u64,
    pub exclude_unjustified: u64,
    pub exclude_justified: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn_unjustified: 2,
            warn_justified: 3,
            exclude_unjustified: 3,
            exclude_justified: 5,
        }
    }
}

/// What the counts call for. Either text is `None` when its threshold is not reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub warning: Option<String>,
    pub exclusion: Option<String>,
}

impl Thresholds {
    pub fn evaluate(&self, counts: AbsenceCounts) -> Verdict {
        let AbsenceCounts {
            unjustified: u,
            justified: j,
        } = counts;

        let warning = if u >= self.warn_unjustified {
            Some(format!(
                "Student has {u} unjustified absences (warning threshold: {}). Risk of exclusion at {} absences.",
                self.warn_unjustified, self.exclude_unjustified
            ))
        } else if j >= self.warn_justified {
            Some(format!(
                "Student has {j} justified absences (warning threshold: {}). Risk of exclusion at {} absences.",
                self.warn_justified, self.exclude_justified
            ))
        } else {
            None
        };

        let exclusion = if u >= self.exclude_unjustified {
            Some(format!(
                "Student has {u} unjustified absences (threshold: {})",
                self.exclude_unjustified
            ))
        } else if j >= self.exclude_justified {
            Some(format!(
                "Student has {j} justified absences (threshold: {})",
                self.exclude_justified
            ))
        } else {
            None
        };

        Verdict { warning, exclusion }
    }
}

/// Records created by one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Escalation {
    pub warning: Option<WarningModel>,
    pub exclusion: Option<ExclusionModel>,
}

pub async fn absence_counts<C>(db: &C, student_id: i64, course_id: i64) -> Result<AbsenceCounts, DbErr>
where
    C: ConnectionTrait,
{
    let in_course = || {
        attendance_record::Entity::find()
            .join(JoinType::InnerJoin, attendance_record::Relation::Session.def())
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .filter(session::Column::CourseId.eq(course_id))
    };

    let unjustified = in_course()
        .filter(attendance_record::Column::Status.is_in(AttendanceStatus::UNJUSTIFIED))
        .count(db)
        .await?;
    let justified = in_course()
        .filter(attendance_record::Column::Status.eq(AttendanceStatus::Justified))
        .count(db)
        .await?;

    Ok(AbsenceCounts {
        unjustified,
        justified,
    })
}

/// Recounts the student's absences in the course and issues whatever the
/// thresholds call for. A pair that already holds an active warning or
/// exclusion gets no second one.
pub async fn run<C>(
    db: &C,
    thresholds: &Thresholds,
    student_id: i64,
    course_id: i64,
) -> AppResult<Escalation>
where
    C: ConnectionTrait,
{
    let counts = absence_counts(db, student_id, course_id).await?;
    let verdict = thresholds.evaluate(counts);
    let absence_count = i32::try_from(counts.total()).unwrap_or(i32::MAX);

    let mut escalation = Escalation::default();

    if let Some(message) = verdict.warning {
        if WarningModel::active_for(db, student_id, course_id).await?.is_none() {
            let issued =
                WarningModel::issue(db, student_id, course_id, absence_count, &message).await;
            escalation.warning = insert_unless_active(issued)?;
        }
    }
    if let Some(reason) = verdict.exclusion {
        if ExclusionModel::active_for(db, student_id, course_id).await?.is_none() {
            let issued =
                ExclusionModel::issue(db, student_id, course_id, absence_count, &reason).await;
            escalation.exclusion = insert_unless_active(issued)?;
        }
    }

    if let Some(w) = &escalation.warning {
        info!(student_id, course_id, warning_id = w.id, absence_count, "warning issued");
    }
    if let Some(e) = &escalation.exclusion {
        info!(student_id, course_id, exclusion_id = e.id, absence_count, "student excluded");
    }
    Ok(escalation)
}

/// A unique violation means a concurrent evaluation issued the record first.
fn insert_unless_active<M>(res: Result<M, DbErr>) -> Result<Option<M>, DbErr> {
    match res {
        Ok(model) => Ok(Some(model)),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => Err(e),
    }
}
