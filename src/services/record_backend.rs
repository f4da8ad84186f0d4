//! The record collection the credential store persists into.

use crate::types::credential::{CredentialSummary, NewRecord, SearchFilter};
use crate::types::errors::StoreError;

/// Trait defining the persistence operations the credential store relies on.
///
/// Keys are exact `(service, username)` pairs. Each mutating call is atomic:
/// on error the collection is left as it was.
pub trait RecordBackend {
    /// Inserts a new record and returns its id.
    ///
    /// Fails with `StoreError::DuplicateRecord` when the key is taken.
    fn insert(&mut self, record: &NewRecord) -> Result<i64, StoreError>;

    /// Replaces digest and description of an existing record.
    ///
    /// Returns the record id, or `None` when no record has that key.
    fn overwrite(&mut self, record: &NewRecord) -> Result<Option<i64>, StoreError>;

    /// Returns the stored digest for an exact key.
    fn digest_for(&self, service: &str, username: &str) -> Result<Option<String>, StoreError>;

    /// Returns matching records sorted by `(service, username)`.
    fn search(&self, filter: &SearchFilter) -> Result<Vec<CredentialSummary>, StoreError>;

    /// Removes the record with an exact key. Returns whether one was removed.
    fn remove(&mut self, service: &str, username: &str) -> Result<bool, StoreError>;
}

impl<T: RecordBackend + ?Sized> RecordBackend for Box<T> {
    fn insert(&mut self, record: &NewRecord) -> Result<i64, StoreError> {
        (**self).insert(record)
    }

    fn overwrite(&mut self, record: &NewRecord) -> Result<Option<i64>, StoreError> {
        (**self).overwrite(record)
    }

    fn digest_for(&self, service: &str, username: &str) -> Result<Option<String>, StoreError> {
        (**self).digest_for(service, username)
    }

    fn search(&self, filter: &SearchFilter) -> Result<Vec<CredentialSummary>, StoreError> {
        (**self).search(filter)
    }

    fn remove(&mut self, service: &str, username: &str) -> Result<bool, StoreError> {
        (**self).remove(service, username)
    }
}
