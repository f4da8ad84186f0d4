use thiserror::Error;

use super::credential::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

// === GeneratorError ===

/// Errors related to password generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// Requested length is below the minimum.
    #[error("Password length must be at least {min} characters, got {0}", min = MIN_PASSWORD_LENGTH)]
    LengthTooShort(usize),
    /// Requested length is above the maximum.
    #[error("Password length must not exceed {max} characters, got {0}", max = MAX_PASSWORD_LENGTH)]
    LengthTooLong(usize),
    /// No character class is enabled.
    #[error("At least one character class must be enabled")]
    EmptyCharacterUniverse,
}

impl GeneratorError {
    /// Returns `true` for either length bound violation.
    pub fn is_invalid_length(&self) -> bool {
        matches!(
            self,
            GeneratorError::LengthTooShort(_) | GeneratorError::LengthTooLong(_)
        )
    }
}

// === CryptoError ===

/// Errors related to credential hashing.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Failed to derive the digest from a password.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
    /// Failed to generate random bytes.
    #[error("Random generation failed: {0}")]
    RandomGeneration(#[source] rand::Error),
}

// === StoreError ===

/// Errors related to the credential store and its backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same service and username already exists.
    ///
    /// `source` carries the backend's constraint error when there is one.
    #[error("Record for {service}/{username} already exists; delete it first or use update")]
    DuplicateRecord {
        service: String,
        username: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// No record exists for the given service and username.
    #[error("Record for {service}/{username} not found")]
    RecordNotFound { service: String, username: String },
    /// The backing store could not be opened.
    #[error("Cannot connect to credential store at {location}: {source}")]
    Connection {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A field failed validation before reaching the backend.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    /// Hashing the password failed.
    #[error("Failed to hash password: {0}")]
    Hashing(#[from] CryptoError),
    /// The backend failed while performing an operation.
    #[error("Failed to {operation}: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    pub(crate) fn backend<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend {
            operation,
            source: Box::new(source),
        }
    }

    pub(crate) fn connection<E>(location: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Connection {
            location: location.into(),
            source: Box::new(source),
        }
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === PassgenError ===

/// Any error the command-line front end can hit.
#[derive(Debug, Error)]
pub enum PassgenError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
