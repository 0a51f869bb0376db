use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::migrations::{EXPECTED_USER_VERSION, REQUIRED_META_KEYS, run_pending};
use crate::store::{connect, map_sqlite_error};
use crate::{ClientError, ClientResult};

const HOME_ENV_VAR: &str = "SALESBOARD_HOME";
const DEFAULT_HOME_DIR: &str = ".salesboard";
const DB_FILE_NAME: &str = "sales.db";

const REQUIRED_CORE_TABLES: [(&str, &[&str]); 2] = [
    ("internal_meta", &["key", "value"]),
    ("internal_kv", &["key", "value", "updated_at"]),
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: PathBuf,
    pub schema_version: String,
}

pub fn ensure_initialized_at(home: &Path) -> ClientResult<SetupContext> {
    initialize(Some(home))
}

/// Creates the store home and database if needed and checks its schema.
///
/// The home is `home_override`, else `SALESBOARD_HOME`, else `~/.salesboard`.
pub(crate) fn initialize(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    let home = resolve_home(home_override)?;
    create_home(&home)?;

    let db_path = home.join(DB_FILE_NAME);
    let mut connection = connect(&db_path)?;

    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;

    verify_core_tables(&connection, &db_path)?;
    repair_meta_keys(&connection, &db_path)?;
    verify_meta(&connection, &db_path)?;

    let schema_version = read_schema_version(&connection, &db_path)?;
    debug!(db_path = %db_path.display(), %schema_version, "sales store ready");

    Ok(SetupContext {
        db_path,
        schema_version,
    })
}

fn resolve_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let home = home_override
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(HOME_ENV_VAR).map(PathBuf::from))
        .or_else(|| home::home_dir().map(|dir| dir.join(DEFAULT_HOME_DIR)))
        .ok_or_else(|| {
            ClientError::store_init_failed(
                Path::new(DEFAULT_HOME_DIR),
                "No home directory found; set `SALESBOARD_HOME`.",
            )
        })?;

    std::path::absolute(&home).map_err(|error| map_io_error(&home, &error))
}

// Sales data stays private to the owning user.
fn create_home(home: &Path) -> ClientResult<()> {
    fs::create_dir_all(home).map_err(|error| map_io_error(home, &error))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        if let Err(error) = fs::set_permissions(home, fs::Permissions::from_mode(0o700)) {
            debug!(home = %home.display(), %error, "could not restrict store permissions");
        }
    }

    Ok(())
}

fn map_io_error(path: &Path, error: &io::Error) -> ClientError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if mapped.code == "store_locked"
                || mapped.code == "store_corrupt"
                || mapped.code == "store_init_permission_denied"
            {
                mapped
            } else {
                ClientError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (table_name, required_columns) in REQUIRED_CORE_TABLES {
        if !table_exists(connection, table_name, db_path)? {
            return Err(ClientError::store_corrupt(db_path));
        }

        let columns = table_columns(connection, table_name, db_path)?;
        for required_column in required_columns {
            if !columns.iter().any(|column| column == required_column) {
                return Err(ClientError::store_corrupt(db_path));
            }
        }
    }

    Ok(())
}

// Insert-only: a missing key is restored, a drifted value is rejected by `verify_meta`.
fn repair_meta_keys(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (meta_key, default_value) in REQUIRED_META_KEYS {
        connection
            .execute(
                "INSERT OR IGNORE INTO internal_meta (key, value) VALUES (?1, ?2)",
                params![meta_key, default_value],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }
    Ok(())
}

fn verify_meta(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if user_version != EXPECTED_USER_VERSION {
        return Err(ClientError::store_corrupt(db_path));
    }

    for (meta_key, expected_value) in REQUIRED_META_KEYS {
        let value = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
                [meta_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        match value {
            Some(actual) if actual == expected_value => {}
            _ => return Err(ClientError::store_corrupt(db_path)),
        }
    }

    Ok(())
}

fn table_exists(connection: &Connection, table_name: &str, db_path: &Path) -> ClientResult<bool> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
            [table_name],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);

    Ok(exists)
}

fn table_columns(
    connection: &Connection,
    table_name: &str,
    db_path: &Path,
) -> ClientResult<Vec<String>> {
    if !REQUIRED_CORE_TABLES
        .iter()
        .any(|(required_name, _)| *required_name == table_name)
    {
        return Err(ClientError::store_init_failed(
            db_path,
            "Refused PRAGMA table inspection for non-core table.",
        ));
    }

    // SAFETY: `table_name` is restricted to REQUIRED_CORE_TABLES and never
    // originates from user input.
    let sql = format!("PRAGMA table_info({table_name})");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut columns: Vec<String> = Vec::new();
    for row in column_iter {
        columns.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(columns)
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    let value = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(value.unwrap_or_else(|| "v1".to_string()))
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::{map_io_error, resolve_home};

    #[test]
    fn explicit_home_wins_over_environment() {
        let resolved = resolve_home(Some(Path::new("/var/tmp/sales-home")));
        assert!(resolved.is_ok());
        if let Ok(path) = resolved {
            assert_eq!(path, Path::new("/var/tmp/sales-home"));
        }
    }

    #[test]
    fn relative_home_is_made_absolute() {
        let resolved = resolve_home(Some(Path::new("relative-home")));
        assert!(resolved.is_ok());
        if let Ok(path) = resolved {
            assert!(path.is_absolute());
            assert!(path.ends_with("relative-home"));
        }
    }

    #[test]
    fn io_errors_map_to_store_codes() {
        let home = Path::new("/tmp/sales-home");
        let denied = map_io_error(home, &io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code, "store_init_permission_denied");

        let other = map_io_error(home, &io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(other.code, "store_init_failed");
    }
}
