use chrono::{DateTime, Duration, Utc};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Length of the check-in window opened by a session.
pub const SESSION_WINDOW_HOURS: i64 = 2;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub start_time: DateTime<Utc>,
    pub expiration_time: DateTime<Utc>,
    /// Six characters over `A-Z0-9`; `None` unless the session is active.
    pub attendance_code: Option<String>,
    pub status: SessionStatus,
    pub room: Option<String>,
    pub time_slot: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "session_status_type")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,

    #[sea_orm(string_value = "active")]
    Active,

    /// Terminal.
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields for a new, not yet started session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub course_id: i64,
    pub teacher_id: i64,
    pub start_time: DateTime<Utc>,
    pub room: Option<String>,
    pub time_slot: Option<String>,
}

impl Model {
    /// Inserts a `Scheduled` session whose window closes
    /// [`SESSION_WINDOW_HOURS`] after `start_time`.
    pub async fn create<C>(db: &C, new: NewSession) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        ActiveModel {
            course_id: Set(new.course_id),
            teacher_id: Set(new.teacher_id),
            start_time: Set(new.start_time),
            expiration_time: Set(new.start_time + window()),
            attendance_code: Set(None),
            status: Set(SessionStatus::Scheduled),
            room: Set(new.room),
            time_slot: Set(new.time_slot),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// True while check-ins are accepted: active and not yet expired.
    pub fn accepts_check_in(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.expiration_time > now
    }
}

pub fn window() -> Duration {
    Duration::hours(SESSION_WINDOW_HOURS)
}
