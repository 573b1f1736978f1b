//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stickynote_core` linkage with deterministic output.
//! - Optionally open a SQLite storage file and summarize its stores.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use stickynote_core::{default_log_level, init_logging, NotesApp, SqliteStorage, StorageKeys};

#[derive(Parser)]
#[command(name = "stickynote")]
#[command(about = "Sticky notes core probe")]
#[command(version)]
struct Cli {
    /// SQLite storage file to open and summarize
    db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("stickynote_core ping={}", stickynote_core::ping());
    println!("stickynote_core version={}", stickynote_core::core_version());

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(db_path) = cli.db_path else {
        return ExitCode::SUCCESS;
    };

    let storage = match SqliteStorage::open(&db_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let app = NotesApp::open(storage, StorageKeys::default(), false);
    println!("notes={}", app.notes().len());
    println!("categories={}", app.categories().len());
    println!("theme={}", app.theme().as_str());
    for category in app.categories().categories() {
        let count = app.visible_notes(Some(category.id.as_str())).len();
        println!("category id={} name={} notes={count}", category.id, category.name);
    }
    ExitCode::SUCCESS
}
