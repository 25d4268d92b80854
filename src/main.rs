//! Binary entry point that glues the fetcher and the SQLite store to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we point tracing at a log file (stdout belongs to the
//! terminal UI), bring up the database, hydrate the initial saved-names list,
//! and drive the Ratatui event loop until the user exits.
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use beer_tracker::{
    connect, data_dir, ensure_schema, fetch_names, run_app, App, RandomBeerApi,
};

/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "beer-tracker.log";

/// Initialize persistence and logging, preload the saved list, and launch the
/// Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// the user's home directory being unwritable) to the terminal instead of
/// crashing silently.
fn main() -> Result<()> {
    let data_dir = data_dir()?;
    init_logging(&data_dir)?;

    let conn = connect()?;
    ensure_schema(&conn)?;
    let names = fetch_names(&conn)?;

    let mut app = App::new(conn, RandomBeerApi::new(), names);
    run_app(&mut app)
}

/// Route tracing output to an append-only file in the data directory. The
/// filter honors `RUST_LOG` and defaults to `info`.
fn init_logging(data_dir: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE_NAME))
        .context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
