use rusqlite::{params, Connection};
use tracing::error;

use super::StoreError;
use crate::models::BeerRecord;

/// Append one fetched record. Returns the store-assigned rowid so callers can
/// log or display it without re-querying. Rows are never updated or deleted.
pub fn insert_beer(conn: &Connection, record: &BeerRecord) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO beers (brand, name, style) VALUES (?1, ?2, ?3)",
        params![record.brand, record.name, record.style],
    )
    .map_err(|err| {
        error!(name = %record.name, %err, "inserting beer failed");
        StoreError::Write(err)
    })?;

    Ok(conn.last_insert_rowid())
}

/// Retrieve every saved beer name ordered by insertion sequence. The query
/// doubles as the single source of truth for how the saved list is ordered in
/// the UI; each call takes a fresh snapshot.
pub fn fetch_names(conn: &Connection) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT name FROM beers ORDER BY id")
        .map_err(read_error)?;

    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(read_error)?
        .collect::<Result<Vec<String>, _>>()
        .map_err(read_error)?;

    Ok(names)
}

fn read_error(err: rusqlite::Error) -> StoreError {
    error!(%err, "reading saved beers failed");
    StoreError::Read(err)
}
