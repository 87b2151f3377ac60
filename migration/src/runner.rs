use colored::*;
use futures::FutureExt;
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use migration::Migrator;

const STATUS_COLUMN: usize = 72;

/// Applies every migration not yet recorded in `seaql_migrations`, one line per step.
pub async fn apply_pending(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        println!("{}", "Schema is up to date".dimmed());
        return Ok(0);
    }

    println!("Applying {} migration(s)...", pending.len());
    let total = pending.len();
    for m in pending {
        let name = m.name().to_owned();
        announce(&name);
        let start = Instant::now();
        // One step at a time so each gets its own status line.
        match AssertUnwindSafe(Migrator::up(db, Some(1))).catch_unwind().await {
            Ok(Ok(())) => println!(
                "{} {}",
                "ok".green(),
                format!("({:.2?})", start.elapsed()).dimmed()
            ),
            Ok(Err(err)) => {
                println!("{}", "failed".red());
                return Err(err);
            }
            Err(_) => {
                println!("{}", "panicked".red());
                return Err(DbErr::Migration(format!("{name} panicked")));
            }
        }
    }
    Ok(total)
}

/// Prints each known migration with whether it has been applied.
pub async fn print_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    let applied: Vec<String> = Migrator::get_applied_migrations(db)
        .await?
        .into_iter()
        .map(|m| m.name().to_owned())
        .collect();

    for m in Migrator::migrations() {
        let name = m.name();
        let mark = if applied.iter().any(|a| a == name) {
            "applied".green()
        } else {
            "pending".yellow()
        };
        announce(name);
        println!("{mark}");
    }
    Ok(())
}

fn announce(name: &str) {
    let label = format!("  {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(name.len() + 2));
    print!("{label}{dots} ");
    let _ = io::stdout().flush();
}
