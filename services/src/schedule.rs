//! Bulk scheduling of a teacher's sessions after a course assignment.
//!
//! Each assigned course gets one session per week for [`SCHEDULE_WEEKS`]
//! weeks, on the weekday given by [`WEEKDAY_ROTATION`], at the hourly slot
//! pinned to the teacher. No collision checks are made.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};
use db::models::{
    course,
    session::{self, NewSession},
    teacher_course::Model as TeacherCourseModel,
    user::{Model as UserModel, Role},
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

pub const SCHEDULE_WEEKS: usize = 4;
pub const WEEKDAY_ROTATION: [Weekday; SCHEDULE_WEEKS] =
    [Weekday::Mon, Weekday::Wed, Weekday::Fri, Weekday::Mon];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn hourly(start_hour: i64) -> Self {
        let start = NaiveTime::MIN + TimeDelta::hours(start_hour);
        Self {
            start,
            end: start + TimeDelta::hours(1),
        }
    }

    /// `"HH:MM-HH:MM"`, as stored in `sessions.time_slot`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Chooses the slot a teacher teaches in from their position among all teachers.
pub trait SlotAssigner: Send + Sync {
    fn slot_for(&self, teacher_ordinal: usize) -> TimeSlot;
}

/// Fixed table of hourly slots, cycled through by teacher ordinal.
#[derive(Debug, Clone)]
pub struct FixedSlotTable {
    slots: Vec<TimeSlot>,
}

impl Default for FixedSlotTable {
    /// Eight hourly slots, 08:00 through 16:00.
    fn default() -> Self {
        Self {
            slots: (8..16).map(TimeSlot::hourly).collect(),
        }
    }
}

impl SlotAssigner for FixedSlotTable {
    fn slot_for(&self, teacher_ordinal: usize) -> TimeSlot {
        self.slots[teacher_ordinal % self.slots.len()]
    }
}

pub fn first_monday_on_or_after(date: NaiveDate) -> NaiveDate {
    let offset = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(offset))
}

/// Start times of the generated sessions, one per week from `anchor_monday`.
pub fn session_starts(anchor_monday: NaiveDate, slot: TimeSlot) -> Vec<DateTime<Utc>> {
    WEEKDAY_ROTATION
        .iter()
        .enumerate()
        .map(|(week, day)| {
            let date = anchor_monday
                + Duration::weeks(week as i64)
                + Duration::days(i64::from(day.num_days_from_monday()));
            date.and_time(slot.start).and_utc()
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentOutcome {
    pub teacher_id: i64,
    pub course_ids: Vec<i64>,
    pub time_slot: String,
    pub sessions_created: usize,
}

/// Replaces the teacher's course assignments with `course_ids` and schedules
/// four weeks of sessions for each of them.
///
/// Every id is validated before the first write. The writes themselves are
/// not atomic; a failure part way leaves what was already written.
pub async fn bulk_assign_sessions<C>(
    db: &C,
    slots: &dyn SlotAssigner,
    teacher_id: i64,
    course_ids: &[i64],
    now: DateTime<Utc>,
) -> AppResult<AssignmentOutcome>
where
    C: ConnectionTrait,
{
    if UserModel::find_with_role(db, teacher_id, Role::Teacher)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Teacher not found"));
    }

    let mut seen = HashSet::new();
    let course_ids: Vec<i64> = course_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let known = course::Entity::find()
        .filter(course::Column::Id.is_in(course_ids.iter().copied()))
        .count(db)
        .await?;
    if known != course_ids.len() as u64 {
        return Err(AppError::not_found("Course not found"));
    }

    TeacherCourseModel::replace_for_teacher(db, teacher_id, &course_ids).await?;

    let ordinal = UserModel::teacher_ids(db)
        .await?
        .iter()
        .position(|&id| id == teacher_id)
        .unwrap_or_default();
    let slot = slots.slot_for(ordinal);
    let starts = session_starts(first_monday_on_or_after(now.date_naive()), slot);

    let mut created = 0;
    for &course_id in &course_ids {
        for &start_time in &starts {
            session::Model::create(
                db,
                NewSession {
                    course_id,
                    teacher_id,
                    start_time,
                    room: None,
                    time_slot: Some(slot.label()),
                },
            )
            .await
            .inspect_err(|e| {
                error!(teacher_id, course_id, created, error = %e, "bulk scheduling stopped")
            })?;
            created += 1;
        }
    }

    info!(teacher_id, courses = course_ids.len(), created, slot = %slot.label(), "courses assigned");
    Ok(AssignmentOutcome {
        teacher_id,
        course_ids,
        time_slot: slot.label(),
        sessions_created: created,
    })
}
