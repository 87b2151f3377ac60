use std::{fs, io, path::Path, process::ExitCode};

use colored::*;
use util::config;

mod runner;

enum Command {
    Up,
    Fresh,
    Clean,
    Status,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg {
            None | Some("up") => Some(Self::Up),
            Some("fresh") => Some(Self::Fresh),
            Some("clean") => Some(Self::Clean),
            Some("status") => Some(Self::Status),
            Some(_) => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let arg = std::env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("usage: migration [up|fresh|clean|status]");
        return ExitCode::from(2);
    };

    let db_path = config::database_path();
    if let Err(err) = run(command, &db_path).await {
        eprintln!("{} {err}", "error:".red().bold());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(command: Command, db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Clean => {
            remove_db_file(db_path)?;
            return Ok(());
        }
        Command::Fresh => remove_db_file(db_path)?,
        Command::Up | Command::Status => {}
    }

    if let Some(parent) = Path::new(db_path).parent() {
        fs::create_dir_all(parent)?;
    }
    let db = sea_orm::Database::connect(format!("sqlite://{db_path}?mode=rwc")).await?;

    match command {
        Command::Status => runner::print_status(&db).await?,
        _ => {
            runner::apply_pending(&db).await?;
        }
    }
    Ok(())
}

fn remove_db_file(path: &str) -> io::Result<()> {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path)?;
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
    Ok(())
}
