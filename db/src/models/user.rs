use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    /// User's unique email address.
    pub email: String,
    /// Whether this account belongs to an admin, a teacher or a student.
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// School-wide role of a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,

    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "student")]
    Student,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(db: &C, full_name: &str, email: &str, role: Role) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            full_name: Set(full_name.to_owned()),
            email: Set(email.to_owned()),
            role: Set(role),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Looks up a user holding the given role. `Ok(None)` if there is no such user
    /// or the user has another role.
    pub async fn find_with_role<C>(db: &C, id: i64, role: Role) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::Role.eq(role))
            .one(db)
            .await
    }

    /// Ids of every teacher, ascending.
    pub async fn teacher_ids<C>(db: &C) -> Result<Vec<i64>, DbErr>
    where
        C: ConnectionTrait,
    {
        let teachers = Entity::find()
            .filter(Column::Role.eq(Role::Teacher))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        Ok(teachers.into_iter().map(|t| t.id).collect())
    }
}
