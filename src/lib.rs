//! Core library surface for the Beer Tracker TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: a remote fetcher for the random-beer endpoint, a SQLite-backed
//! store, and the coordinator that sequences one fetch-and-save action.
pub mod api;
pub mod coordinator;
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to initialize the embedded SQLite store and
/// preload the saved-names list.
pub use db::{connect, data_dir, ensure_schema, fetch_names};

/// The remote side: the live endpoint client plus the trait seam it fills.
pub use api::{BeerSource, RandomBeerApi};

/// The record type every layer passes around.
pub use models::BeerRecord;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
