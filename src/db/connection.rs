use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;
use tracing::error;

use super::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".beer-tracker";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "beers.sqlite";

/// Resolve (and create if missing) the application data directory. The log
/// file lives here as well, so `main` calls this before the store opens.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dirs =
        BaseDirs::new().ok_or_else(|| StoreError::DataDir("could not locate home directory".into()))?;
    let dir = base_dirs.home_dir().join(DATA_DIR_NAME);
    fs::create_dir_all(&dir).map_err(|err| StoreError::DataDir(err.to_string()))?;
    Ok(dir)
}

/// Open the session-wide connection to the on-disk database. Opened once in
/// `main` and handed to the app; dropped (and thereby closed) at exit.
pub fn connect() -> Result<Connection, StoreError> {
    let db_path = data_dir()?.join(DB_FILE_NAME);
    Connection::open(&db_path).map_err(|err| {
        error!(path = %db_path.display(), %err, "opening database failed");
        StoreError::Open(err)
    })
}

/// Idempotently create the beer table. Safe to call on every startup; an
/// existing table and its rows are left untouched.
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS beers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            brand TEXT,
            name TEXT,
            style TEXT
        )",
        [],
    )
    .map_err(|err| {
        error!(%err, "creating beers table failed");
        StoreError::Schema(err)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fetch_names, insert_beer};
    use crate::models::BeerRecord;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        // The table is usable after the double call and holds no rows.
        assert!(fetch_names(&conn).unwrap().is_empty());
    }

    #[test]
    fn ensure_schema_preserves_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        let record = BeerRecord {
            brand: "Heineken".into(),
            name: "Heineken Lager".into(),
            style: "Pale Lager".into(),
        };
        insert_beer(&conn, &record).unwrap();

        ensure_schema(&conn).unwrap();
        assert_eq!(fetch_names(&conn).unwrap(), vec!["Heineken Lager"]);
    }
}
