//! JSON-file credential records.
//!
//! The whole collection lives in one JSON document that is rewritten on every
//! mutation through a temp file in the same directory, then renamed into
//! place. There is no locking: the last writer wins.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::services::record_backend::RecordBackend;
use crate::types::credential::{CredentialRecord, CredentialSummary, NewRecord, SearchFilter};
use crate::types::errors::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct RecordFile {
    next_id: i64,
    records: Vec<CredentialRecord>,
}

impl Default for RecordFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl RecordFile {
    fn position(&self, service: &str, username: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.service == service && r.username == username)
    }
}

/// Record backend storing every credential in a single JSON file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Opens the JSON store at `path`, creating its directory if needed.
    ///
    /// An existing file must parse; a missing file is an empty store.
    ///
    /// # Errors
    /// `StoreError::Connection` when the directory cannot be created or the file is unreadable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let location = path.display().to_string();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::connection(location.clone(), e))?;
        }
        let backend = Self { path };
        backend
            .load("open credential file")
            .map_err(|e| match e {
                StoreError::Backend { source, .. } => StoreError::Connection { location, source },
                other => other,
            })?;
        log::debug!("opened json credential store at {}", backend.path.display());
        Ok(backend)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, operation: &'static str) -> Result<RecordFile, StoreError> {
        if !self.path.exists() {
            return Ok(RecordFile::default());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::backend(operation, e))?;
        if content.trim().is_empty() {
            return Ok(RecordFile::default());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::backend(operation, e))
    }

    fn persist(&self, file: &RecordFile, operation: &'static str) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(file).map_err(|e| StoreError::backend(operation, e))?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::backend(operation, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StoreError::backend(operation, e))?;
        tmp.flush().map_err(|e| StoreError::backend(operation, e))?;

        #[cfg(unix)]
        {
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| StoreError::backend(operation, e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StoreError::backend(operation, e.error))?;
        Ok(())
    }
}

impl RecordBackend for JsonFileBackend {
    fn insert(&mut self, record: &NewRecord) -> Result<i64, StoreError> {
        const OP: &str = "save password";
        let mut file = self.load(OP)?;
        if file.position(&record.service, &record.username).is_some() {
            return Err(StoreError::DuplicateRecord {
                service: record.service.clone(),
                username: record.username.clone(),
                source: None,
            });
        }

        let id = file.next_id;
        file.next_id += 1;
        file.records.push(CredentialRecord {
            id,
            service: record.service.clone(),
            username: record.username.clone(),
            password_hash: record.password_hash.clone(),
            description: record.description.clone(),
        });
        self.persist(&file, OP)?;
        Ok(id)
    }

    fn overwrite(&mut self, record: &NewRecord) -> Result<Option<i64>, StoreError> {
        const OP: &str = "update password";
        let mut file = self.load(OP)?;
        let Some(index) = file.position(&record.service, &record.username) else {
            return Ok(None);
        };

        let existing = &mut file.records[index];
        existing.password_hash = record.password_hash.clone();
        existing.description = record.description.clone();
        let id = existing.id;
        self.persist(&file, OP)?;
        Ok(Some(id))
    }

    fn digest_for(&self, service: &str, username: &str) -> Result<Option<String>, StoreError> {
        let file = self.load("verify password")?;
        Ok(file
            .position(service, username)
            .map(|i| file.records[i].password_hash.clone()))
    }

    fn search(&self, filter: &SearchFilter) -> Result<Vec<CredentialSummary>, StoreError> {
        let file = self.load("search passwords")?;
        let mut found: Vec<CredentialSummary> = file
            .records
            .iter()
            .filter(|r| filter.matches(&r.service, &r.username))
            .map(CredentialRecord::summary)
            .collect();
        found.sort_by(|a, b| {
            a.service
                .cmp(&b.service)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(found)
    }

    fn remove(&mut self, service: &str, username: &str) -> Result<bool, StoreError> {
        const OP: &str = "delete password";
        let mut file = self.load(OP)?;
        let Some(index) = file.position(service, username) else {
            return Ok(false);
        };
        file.records.remove(index);
        self.persist(&file, OP)?;
        Ok(true)
    }
}
