//! The fetch-and-save sequence behind the "fetch new beer" action: one remote
//! fetch, one append to the store, one re-read of the saved-names projection.
//! Each step is its own transaction; there is no cross-step atomicity, and a
//! failed step stops the sequence.

use rusqlite::Connection;
use tracing::{error, info};

use crate::api::{BeerSource, FetchError};
use crate::db::{fetch_names, insert_beer, StoreError};
use crate::models::BeerRecord;

/// Result of a fetch that made it past the network. The fetched record is
/// carried in both arms: the original app updated the detail display even
/// when persistence failed, and we keep that behavior so the user still sees
/// what was fetched.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Fetch, insert, and list-refresh all completed.
    Saved {
        /// The freshly fetched record, now persisted.
        record: BeerRecord,
        /// The full saved-names list re-read after the insert.
        names: Vec<String>,
    },
    /// Fetch succeeded but the insert or the read-back failed. The caller
    /// should keep its previous name list.
    StoreFailed {
        /// The fetched record, displayable but not persisted (or persisted
        /// with an unreadable projection, if the read-back was what failed).
        record: BeerRecord,
        /// Which store operation failed.
        error: StoreError,
    },
}

/// Run one complete sequence. A fetch failure propagates immediately and no
/// store operation is attempted; store failures are folded into the outcome
/// so the caller chooses what to show.
pub fn fetch_and_save(
    source: &impl BeerSource,
    conn: &Connection,
) -> Result<SaveOutcome, FetchError> {
    let record = source.fetch().map_err(|err| {
        error!(%err, "beer fetch failed");
        err
    })?;

    if let Err(error) = insert_beer(conn, &record) {
        return Ok(SaveOutcome::StoreFailed { record, error });
    }

    match fetch_names(conn) {
        Ok(names) => {
            info!(name = %record.name, total = names.len(), "beer saved");
            Ok(SaveOutcome::Saved { record, names })
        }
        Err(error) => Ok(SaveOutcome::StoreFailed { record, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    /// Canned source returning a fixed record, or a decode error when empty.
    struct StubSource(Option<BeerRecord>);

    impl BeerSource for StubSource {
        fn fetch(&self) -> Result<BeerRecord, FetchError> {
            match &self.0 {
                Some(record) => Ok(record.clone()),
                None => Err(FetchError::Decode(
                    serde_json::from_str::<BeerRecord>("garbage").unwrap_err(),
                )),
            }
        }
    }

    fn guinness() -> BeerRecord {
        BeerRecord {
            brand: "Guinness".into(),
            name: "Guinness Draught".into(),
            style: "Stout".into(),
        }
    }

    fn memory_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn successful_sequence_persists_and_lists_the_record() {
        let conn = memory_conn();
        let source = StubSource(Some(guinness()));

        let outcome = fetch_and_save(&source, &conn).unwrap();
        match outcome {
            SaveOutcome::Saved { record, names } => {
                assert_eq!(record, guinness());
                assert_eq!(names, vec!["Guinness Draught"]);
            }
            SaveOutcome::StoreFailed { error, .. } => panic!("store failed: {error}"),
        }

        // The row is durably in the store, not just in the outcome.
        assert_eq!(fetch_names(&conn).unwrap(), vec!["Guinness Draught"]);
    }

    #[test]
    fn two_sequences_append_two_rows() {
        let conn = memory_conn();
        let source = StubSource(Some(guinness()));

        let before = fetch_names(&conn).unwrap().len();
        fetch_and_save(&source, &conn).unwrap();
        fetch_and_save(&source, &conn).unwrap();

        assert_eq!(fetch_names(&conn).unwrap().len(), before + 2);
    }

    #[test]
    fn fetch_failure_skips_the_store_entirely() {
        let conn = memory_conn();
        let source = StubSource(None);

        let err = fetch_and_save(&source, &conn).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(fetch_names(&conn).unwrap().is_empty());
    }

    #[test]
    fn insert_failure_still_returns_the_fetched_record() {
        // No schema, so the insert hits a missing table.
        let conn = Connection::open_in_memory().unwrap();
        let source = StubSource(Some(guinness()));

        let outcome = fetch_and_save(&source, &conn).unwrap();
        match outcome {
            SaveOutcome::StoreFailed { record, error } => {
                assert_eq!(record, guinness());
                assert!(matches!(error, StoreError::Write(_)));
            }
            SaveOutcome::Saved { .. } => panic!("insert should have failed"),
        }
    }
}
