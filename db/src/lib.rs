pub mod filters;
pub mod models;
pub mod test_utils;


use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use util::config;

/// Connects to the configured database.
///
/// `DATABASE_PATH` may be a full DSN or a plain SQLite file path; file paths get
/// their parent directory created and `mode=rwc` appended.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let path_or_url = config::database_path();
    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    tracing::info!(%url, "connecting to database");
    Database::connect(&url).await
}
