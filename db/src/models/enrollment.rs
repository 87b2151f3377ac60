use chrono::{DateTime, Utc};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A student enrolled in a course (`course_students`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "course_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn enroll<C>(db: &C, course_id: i64, student_id: i64) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(Utc::now()),
        }
        .insert(db)
        .await
    }

    pub async fn is_enrolled<C>(db: &C, course_id: i64, student_id: i64) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let found = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await?;
        Ok(found.is_some())
    }
}
