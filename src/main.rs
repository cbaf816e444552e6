mod analytics;
mod cli;
mod commands;
mod db;
mod export;
mod models;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose; otherwise only warnings reach stderr
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let db_path = match cli.db {
        Some(path) => path,
        None => get_db_path()?,
    };
    let db = db::Database::open(&db_path)?;
    debug!(expenses = db.get_expense_count()?, "database ready");

    let now = chrono::Local::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &db, &now, &mut out)
}

fn get_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "exptrack", "exptrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("exptrack.db"))
}
