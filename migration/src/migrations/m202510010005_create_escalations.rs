// migration: warnings + exclusions raised by the escalation engine
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_escalations"
    }
}

fn escalation_table(table: &str, text_column: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new("id"))
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Alias::new("student_id"))
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Alias::new("course_id"))
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Alias::new("absence_count"))
                .integer()
                .not_null(),
        )
        .col(ColumnDef::new(Alias::new(text_column)).text().not_null())
        .col(
            ColumnDef::new(Alias::new("is_active"))
                .boolean()
                .not_null()
                .default(true),
        )
        .col(
            ColumnDef::new(Alias::new("issued_at"))
                .timestamp()
                .not_null()
                .default(Expr::cust("CURRENT_TIMESTAMP")),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{table}_student"))
                .from(Alias::new(table), Alias::new("student_id"))
                .to(Alias::new("users"), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{table}_course"))
                .from(Alias::new(table), Alias::new("course_id"))
                .to(Alias::new("courses"), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(escalation_table("warnings", "message"))
            .await?;
        manager
            .create_table(escalation_table("exclusions", "reason"))
            .await?;

        // At most one active row per (student, course).
        let conn = manager.get_connection();
        for table in ["warnings", "exclusions"] {
            conn.execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_{table}_active \
                 ON {table} (student_id, course_id) WHERE is_active = TRUE"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("exclusions")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("warnings")).to_owned())
            .await
    }
}
