use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

pub const EXPECTED_USER_VERSION: i64 = 1;

pub const REQUIRED_META_KEYS: [(&str, &str); 2] = [
    ("schema_version", "v1"),
    ("record_format", "sales_json_v1"),
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(vec![M::up(BOOTSTRAP_SQL)]);
    migrations.to_latest(conn)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::{EXPECTED_USER_VERSION, run_pending};

    #[test]
    fn migrations_reach_expected_user_version_and_are_idempotent() {
        let connection = Connection::open_in_memory();
        assert!(connection.is_ok());
        if let Ok(mut conn) = connection {
            assert!(run_pending(&mut conn).is_ok());
            assert!(run_pending(&mut conn).is_ok());
            let version = conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0));
            assert!(version.is_ok());
            if let Ok(value) = version {
                assert_eq!(value, EXPECTED_USER_VERSION);
            }
        }
    }
}
