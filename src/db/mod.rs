//! Persistence module split across logical submodules.

mod beers;
mod connection;

pub use beers::{fetch_names, insert_beer};
pub use connection::{connect, data_dir, ensure_schema};

use thiserror::Error;

/// Typed failures for every store operation. The UI decides which of these to
/// surface; nothing is swallowed inside this module beyond a diagnostic log.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The application data directory could not be located or created.
    #[error("could not prepare the data directory: {0}")]
    DataDir(String),
    /// Opening the SQLite file failed.
    #[error("failed to open the beer database")]
    Open(#[source] rusqlite::Error),
    /// Creating the `beers` table failed.
    #[error("failed to create the beer table")]
    Schema(#[source] rusqlite::Error),
    /// Appending a row failed.
    #[error("failed to save the beer")]
    Write(#[source] rusqlite::Error),
    /// Reading the saved-names projection failed.
    #[error("failed to load saved beers")]
    Read(#[source] rusqlite::Error),
}
