use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::ffi::ErrorCode;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::sales::record::SaleRecord;
use crate::setup::SetupContext;
use crate::store::{SALES_KEY, SalesStore, decode_records, encode_records};
use crate::{ClientError, ClientResult};

const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Store backed by the `internal_kv` table of an initialized sales database.
pub struct SqliteStore {
    connection: Connection,
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn open(setup: &SetupContext) -> ClientResult<Self> {
        Ok(Self {
            connection: connect(&setup.db_path)?,
            db_path: setup.db_path.clone(),
        })
    }
}

/// Opens `db_path`, waiting briefly on a concurrent writer before reporting a lock.
pub(crate) fn connect(db_path: &Path) -> ClientResult<Connection> {
    let connection =
        Connection::open(db_path).map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

/// Maps SQLite result codes for the sales database file onto store error codes.
pub(crate) fn map_sqlite_error(db_path: &Path, error: &rusqlite::Error) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(db_path)
        }
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt) => {
            ClientError::store_corrupt(db_path)
        }
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly) => {
            ClientError::store_init_permission_denied(db_path, &error.to_string())
        }
        _ => ClientError::store_init_failed(db_path, &error.to_string()),
    }
}

impl SalesStore for SqliteStore {
    fn load(&self) -> ClientResult<Vec<SaleRecord>> {
        let blob = self
            .connection
            .query_row(
                "SELECT value FROM internal_kv WHERE key = ?1 LIMIT 1",
                [SALES_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let records = blob.as_deref().map(decode_records).unwrap_or_default();
        debug!(count = records.len(), "loaded sales records");
        Ok(records)
    }

    fn save(&mut self, records: &[SaleRecord]) -> ClientResult<()> {
        let blob = encode_records(records)?;
        self.connection
            .execute(
                "INSERT INTO internal_kv (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![SALES_KEY, blob],
            )
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        debug!(count = records.len(), "saved sales records");
        Ok(())
    }
}
