use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::credential::{GeneratorOptions, DEFAULT_PASSWORD_LENGTH};

/// Which record backend holds the credentials.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
}

impl StorageBackend {
    /// File name used inside the data directory when no path is configured.
    pub fn default_file_name(self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "passgen.db",
            StorageBackend::Json => "passgen.json",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Json => write!(f, "json"),
        }
    }
}

/// Top-level passgen settings, stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Store location. `None` means `<data_dir>/<backend default file name>`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub generator: GeneratorDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: None,
            generator: GeneratorDefaults::default(),
        }
    }
}

/// Defaults applied to `generate` when the command line leaves them out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorDefaults {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_true")]
    pub use_uppercase: bool,
    #[serde(default = "default_true")]
    pub use_digits: bool,
    #[serde(default = "default_true")]
    pub use_special: bool,
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            use_uppercase: true,
            use_digits: true,
            use_special: true,
        }
    }
}

impl GeneratorDefaults {
    pub fn to_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            length: self.length,
            use_uppercase: self.use_uppercase,
            use_digits: self.use_digits,
            use_special: self.use_special,
        }
    }
}

fn default_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

fn default_true() -> bool {
    true
}
