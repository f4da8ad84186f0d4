//! SQLite storage for credential records.
//!
//! [`Database`] opens and migrates the file; [`SqliteBackend`] implements the
//! record backend on top of it.
//!
//! ```no_run
//! use passgen::database::{Database, SqliteBackend};
//!
//! let db = Database::open("passgen.db").expect("open");
//! assert_eq!(db.schema_version().expect("version"), 1);
//! let backend = SqliteBackend::from_database(db);
//! ```

pub mod connection;
pub mod migrations;
pub mod sqlite_backend;

pub use connection::Database;
pub use sqlite_backend::SqliteBackend;
