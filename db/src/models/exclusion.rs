use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::Serialize;

use crate::filters::EscalationFilter;

/// Exclusion of a student from a course; blocks further check-ins while active.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "exclusions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Total absences (justified + unjustified) when the exclusion was issued.
    pub absence_count: i32,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub is_active: bool,
    pub issued_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts an active exclusion. Fails with a unique-constraint violation when
    /// the pair already holds an active one.
    pub async fn issue<C>(
        db: &C,
        student_id: i64,
        course_id: i64,
        absence_count: i32,
        reason: &str,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            absence_count: Set(absence_count),
            reason: Set(reason.to_owned()),
            is_active: Set(true),
            issued_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn active_for<C>(db: &C, student_id: i64, course_id: i64) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }

    pub async fn list<C>(db: &C, filter: &EscalationFilter) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = Entity::find();
        if let Some(student_id) = filter.student_id {
            query = query.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = filter.course_id {
            query = query.filter(Column::CourseId.eq(course_id));
        }
        if filter.active_only {
            query = query.filter(Column::IsActive.eq(true));
        }
        query
            .order_by_desc(Column::IssuedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Sets `is_active` on a single exclusion. `Ok(None)` if the id is unknown.
    pub async fn set_active<C>(db: &C, id: i64, is_active: bool) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let mut am: ActiveModel = existing.into();
        am.is_active = Set(is_active);
        am.update(db).await.map(Some)
    }
}
