mod analytics;
mod db;
mod export;
mod ledger;
mod models;
mod run;
mod ui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the platform data directory.
const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    setup_logging(&data_dir)?;

    let db = open_database(&data_dir.join("fintrack.db"))?;
    let mut ledger = ledger::Ledger::load(db);
    let today = chrono::Local::now().date_naive();

    match args.len() {
        1 => {
            run::as_tui(&mut ledger, today)?;
            ledger.save_all()
        }
        _ => run::as_cli(&args, &mut ledger, today),
    }
}

/// A database that cannot be opened degrades to an in-memory store so the
/// session still works; nothing is persisted in that case.
fn open_database(path: &Path) -> Result<db::Database> {
    match db::Database::open(path) {
        Ok(db) => Ok(db),
        Err(e) => {
            tracing::warn!(error = ?e, path = %path.display(), "falling back to in-memory storage");
            eprintln!("Warning: {e:#}. Changes will not be saved.");
            db::Database::open_in_memory()
        }
    }
}

fn setup_logging(data_dir: &Path) -> Result<()> {
    let log_path = data_dir.join("fintrack.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    // The TUI owns the terminal, so logs only go to the file.
    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_log)
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

fn get_data_dir() -> Result<PathBuf> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => directories::ProjectDirs::from("com", "fintrack", "Fintrack")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}
