//! Unit tests for the passgen database layer (connection + migrations).

use passgen::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use passgen::database::connection::BUSY_TIMEOUT;
use passgen::database::Database;
use rusqlite::Connection;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_passwords_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='passwords'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Table 'passwords' should exist after migrations");
}

#[test]
fn test_migrations_create_service_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='index' AND name='idx_passwords_service'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists);
}

#[test]
fn test_schema_version_is_recorded() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_schema_version_without_table_is_an_error() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(get_schema_version(&conn).is_err());
}

#[test]
fn test_schema_version_of_empty_table_is_zero() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at INTEGER NOT NULL, description TEXT NOT NULL);",
    )
    .unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), 0);
}

#[test]
fn test_database_reports_schema_version() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("passgen.db")).unwrap();
    assert_eq!(db.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_file_database_waits_on_locks() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("passgen.db")).unwrap();
    let timeout_ms: i64 = db
        .connection()
        .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
        .unwrap();
    assert_eq!(timeout_ms, BUSY_TIMEOUT.as_millis() as i64);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let result = run_all(db.connection());
    assert!(result.is_ok(), "Running migrations twice should succeed (idempotent)");
    assert_eq!(get_schema_version(db.connection()).unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_open_file_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("passgen.db");

    let db = Database::open(&db_path);
    assert!(db.is_ok(), "open with file path should succeed");
    assert!(db_path.exists(), "Database file should exist on disk");
}

#[test]
fn test_reopening_keeps_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("passgen.db");

    {
        let db = Database::open(&db_path).unwrap();
        db.connection()
            .execute(
                "INSERT INTO passwords (service, username, password_hash) VALUES ('gmail', 'alice', 'x$y')",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    let count: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM passwords", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_description_defaults_to_empty() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();
    conn.execute(
        "INSERT INTO passwords (service, username, password_hash) VALUES ('gmail', 'alice', 'x$y')",
        [],
    )
    .unwrap();
    let description: String = conn
        .query_row("SELECT description FROM passwords", [], |row| row.get(0))
        .unwrap();
    assert_eq!(description, "");
}

#[test]
fn test_unique_service_username_constraint() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();
    let insert = "INSERT INTO passwords (service, username, password_hash) VALUES (?1, ?2, 'x$y')";
    conn.execute(insert, ["gmail", "alice"]).unwrap();
    assert!(conn.execute(insert, ["gmail", "alice"]).is_err());
    assert!(conn.execute(insert, ["gmail", "bob"]).is_ok());
}
