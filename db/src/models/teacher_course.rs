use chrono::{DateTime, Utc};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A teacher assigned to a course (`teacher_courses`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "teacher_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub teacher_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn assign<C>(db: &C, teacher_id: i64, course_id: i64) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            teacher_id: Set(teacher_id),
            course_id: Set(course_id),
            assigned_at: Set(Utc::now()),
        }
        .insert(db)
        .await
    }

    pub async fn is_assigned<C>(db: &C, teacher_id: i64, course_id: i64) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let found = Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await?;
        Ok(found.is_some())
    }

    /// Drops every assignment of the teacher and assigns the given courses instead.
    pub async fn replace_for_teacher<C>(
        db: &C,
        teacher_id: i64,
        course_ids: &[i64],
    ) -> Result<Vec<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::delete_many()
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(db)
            .await?;

        let mut assigned = Vec::with_capacity(course_ids.len());
        for &course_id in course_ids {
            assigned.push(Self::assign(db, teacher_id, course_id).await?);
        }
        Ok(assigned)
    }
}
