//! Credential store for passgen.
//!
//! Hashes passwords before they reach the backend, enforces one record per
//! `(service, username)`, and answers search, verify, update and delete
//! requests. A duplicate `save` is rejected; overwriting goes through
//! `update`.

use crate::services::credential_hasher::{CredentialHasher, CredentialHasherTrait};
use crate::services::record_backend::RecordBackend;
use crate::types::credential::{CredentialSummary, NewRecord, SearchFilter};
use crate::types::errors::StoreError;

/// Trait defining the credential store operations exposed to the CLI.
pub trait CredentialStoreTrait {
    fn save(&mut self, service: &str, username: &str, password: &str, description: &str) -> Result<i64, StoreError>;
    fn update(&mut self, service: &str, username: &str, password: &str, description: &str) -> Result<i64, StoreError>;
    fn find(&self, service: Option<&str>, username: Option<&str>) -> Result<Vec<CredentialSummary>, StoreError>;
    fn list(&self) -> Result<Vec<CredentialSummary>, StoreError>;
    fn verify(&self, service: &str, username: &str, password: &str) -> Result<bool, StoreError>;
    fn delete(&mut self, service: &str, username: &str) -> Result<bool, StoreError>;
}

/// Credential store over any record backend.
pub struct CredentialStore<B, H = CredentialHasher> {
    backend: B,
    hasher: H,
}

impl<B: RecordBackend> CredentialStore<B, CredentialHasher> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            hasher: CredentialHasher::new(),
        }
    }
}

impl<B: RecordBackend, H: CredentialHasherTrait> CredentialStore<B, H> {
    pub fn with_hasher(backend: B, hasher: H) -> Self {
        Self { backend, hasher }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn build_record(
        &mut self,
        service: &str,
        username: &str,
        password: &str,
        description: &str,
    ) -> Result<NewRecord, StoreError> {
        require_non_empty("service", service)?;
        require_non_empty("username", username)?;
        let password_hash = self.hasher.hash(password)?;
        Ok(NewRecord {
            service: service.to_string(),
            username: username.to_string(),
            password_hash,
            description: description.to_string(),
        })
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

impl<B: RecordBackend, H: CredentialHasherTrait> CredentialStoreTrait for CredentialStore<B, H> {
    fn save(&mut self, service: &str, username: &str, password: &str, description: &str) -> Result<i64, StoreError> {
        let record = self.build_record(service, username, password, description)?;
        match self.backend.insert(&record) {
            Ok(id) => {
                log::info!("saved credential {}/{} (id {})", service, username, id);
                Ok(id)
            }
            Err(e) => {
                log::warn!("could not save credential {}/{}: {}", service, username, e);
                Err(e)
            }
        }
    }

    fn update(&mut self, service: &str, username: &str, password: &str, description: &str) -> Result<i64, StoreError> {
        let record = self.build_record(service, username, password, description)?;
        match self.backend.overwrite(&record)? {
            Some(id) => {
                log::info!("updated credential {}/{} (id {})", service, username, id);
                Ok(id)
            }
            None => Err(StoreError::RecordNotFound {
                service: service.to_string(),
                username: username.to_string(),
            }),
        }
    }

    fn find(&self, service: Option<&str>, username: Option<&str>) -> Result<Vec<CredentialSummary>, StoreError> {
        let filter = SearchFilter::new(service, username);
        let found = self.backend.search(&filter)?;
        log::debug!("find {:?} returned {} record(s)", filter, found.len());
        Ok(found)
    }

    fn list(&self) -> Result<Vec<CredentialSummary>, StoreError> {
        self.find(None, None)
    }

    fn verify(&self, service: &str, username: &str, password: &str) -> Result<bool, StoreError> {
        let Some(digest) = self.backend.digest_for(service, username)? else {
            log::debug!("verify {}/{}: no such record", service, username);
            return Ok(false);
        };
        let ok = self.hasher.verify(password, &digest);
        log::debug!("verify {}/{}: {}", service, username, if ok { "match" } else { "mismatch" });
        Ok(ok)
    }

    fn delete(&mut self, service: &str, username: &str) -> Result<bool, StoreError> {
        let removed = self.backend.remove(service, username)?;
        if removed {
            log::info!("deleted credential {}/{}", service, username);
        }
        Ok(removed)
    }
}
