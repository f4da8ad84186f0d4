//! SQLite-backed credential records.

use rusqlite::{params, ErrorCode, OptionalExtension};
use std::path::Path;

use super::connection::Database;
use crate::services::record_backend::RecordBackend;
use crate::types::credential::{CredentialSummary, NewRecord, SearchFilter};
use crate::types::errors::StoreError;

/// Record backend over the `passwords` table.
pub struct SqliteBackend {
    db: Database,
}

impl SqliteBackend {
    /// Opens (or creates) the database file at `path`.
    ///
    /// # Errors
    /// `StoreError::Connection` when the file cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::connection(path.display().to_string(), e))?;
        }
        let db = Database::open(path)
            .map_err(|e| StoreError::connection(path.display().to_string(), e))?;
        log::debug!("opened sqlite credential store at {}", path.display());
        Ok(Self { db })
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let db = Database::open_in_memory().map_err(|e| StoreError::connection(":memory:", e))?;
        Ok(Self { db })
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl RecordBackend for SqliteBackend {
    fn insert(&mut self, record: &NewRecord) -> Result<i64, StoreError> {
        const OP: &str = "save password";
        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::backend(OP, e))?;

        let inserted = tx.execute(
            "INSERT INTO passwords (service, username, password_hash, description) VALUES (?1, ?2, ?3, ?4)",
            params![record.service, record.username, record.password_hash, record.description],
        );
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::DuplicateRecord {
                    service: record.service.clone(),
                    username: record.username.clone(),
                    source: Some(Box::new(e)),
                });
            }
            Err(e) => return Err(StoreError::backend(OP, e)),
        }

        let id = tx.last_insert_rowid();
        tx.commit().map_err(|e| StoreError::backend(OP, e))?;
        Ok(id)
    }

    fn overwrite(&mut self, record: &NewRecord) -> Result<Option<i64>, StoreError> {
        const OP: &str = "update password";
        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::backend(OP, e))?;

        let id: Option<i64> = tx
            .query_row(
                "SELECT id FROM passwords WHERE service = ?1 AND username = ?2",
                params![record.service, record.username],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::backend(OP, e))?;

        let Some(id) = id else {
            return Ok(None);
        };

        tx.execute(
            "UPDATE passwords SET password_hash = ?1, description = ?2 WHERE id = ?3",
            params![record.password_hash, record.description, id],
        )
        .map_err(|e| StoreError::backend(OP, e))?;
        tx.commit().map_err(|e| StoreError::backend(OP, e))?;
        Ok(Some(id))
    }

    fn digest_for(&self, service: &str, username: &str) -> Result<Option<String>, StoreError> {
        self.db
            .connection()
            .query_row(
                "SELECT password_hash FROM passwords WHERE service = ?1 AND username = ?2",
                params![service, username],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::backend("verify password", e))
    }

    fn search(&self, filter: &SearchFilter) -> Result<Vec<CredentialSummary>, StoreError> {
        const OP: &str = "search passwords";
        let conn = self.db.connection();
        // SQLite's lower() only folds ASCII, so matching happens on the Rust side.
        let mut stmt = conn
            .prepare(
                "SELECT id, service, username, description FROM passwords ORDER BY service, username",
            )
            .map_err(|e| StoreError::backend(OP, e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CredentialSummary {
                    id: row.get(0)?,
                    service: row.get(1)?,
                    username: row.get(2)?,
                    description: row.get(3)?,
                })
            })
            .map_err(|e| StoreError::backend(OP, e))?;

        let mut result = Vec::new();
        for row in rows {
            let summary = row.map_err(|e| StoreError::backend(OP, e))?;
            if filter.matches(&summary.service, &summary.username) {
                result.push(summary);
            }
        }
        Ok(result)
    }

    fn remove(&mut self, service: &str, username: &str) -> Result<bool, StoreError> {
        const OP: &str = "delete password";
        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::backend(OP, e))?;
        let removed = tx
            .execute(
                "DELETE FROM passwords WHERE service = ?1 AND username = ?2",
                params![service, username],
            )
            .map_err(|e| StoreError::backend(OP, e))?;
        tx.commit().map_err(|e| StoreError::backend(OP, e))?;
        Ok(removed > 0)
    }
}
