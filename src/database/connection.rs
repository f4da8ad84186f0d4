//! SQLite connection handling for the credential store.
//!
//! [`Database`] owns one `rusqlite::Connection`, brings the schema up to
//! date on open and waits on a locked file instead of failing at once.

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use super::migrations;

/// How long a statement waits for another process holding the write lock.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// An open, migrated credential database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path`.
    ///
    /// Two `passgen` invocations may write the same file; the second one
    /// waits up to [`BUSY_TIMEOUT`] and then sees the first one's rows, so a
    /// racing insert of the same key ends in a unique-constraint error.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::migrated(conn)
    }

    /// Opens a private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        log::debug!(
            "database ready at schema version {}",
            migrations::get_schema_version(&conn)?
        );
        Ok(Self { conn })
    }

    /// Schema version recorded in this database.
    pub fn schema_version(&self) -> Result<i32, rusqlite::Error> {
        migrations::get_schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
