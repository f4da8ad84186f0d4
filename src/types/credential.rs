use serde::{Deserialize, Serialize};

/// Shortest password the generator will produce.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Longest password the generator will produce.
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Length used when the caller does not ask for one.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Options for generating a random password. Lowercase letters are always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub length: usize,
    pub use_uppercase: bool,
    pub use_digits: bool,
    pub use_special: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            use_uppercase: true,
            use_digits: true,
            use_special: true,
        }
    }
}

/// A full stored credential row, digest included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: i64,
    pub service: String,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub description: String,
}

impl CredentialRecord {
    pub fn summary(&self) -> CredentialSummary {
        CredentialSummary {
            id: self.id,
            service: self.service.clone(),
            username: self.username.clone(),
            description: self.description.clone(),
        }
    }
}

/// A record about to be written. `password_hash` is already a digest token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub service: String,
    pub username: String,
    pub password_hash: String,
    pub description: String,
}

/// What listings return: everything except the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    pub id: i64,
    pub service: String,
    pub username: String,
    pub description: String,
}

/// Case-insensitive substring filters for `find`. `None` or empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub service: Option<String>,
    pub username: Option<String>,
}

impl SearchFilter {
    pub fn new(service: Option<&str>, username: Option<&str>) -> Self {
        let normalize = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| v.to_lowercase())
        };
        Self {
            service: normalize(service),
            username: normalize(username),
        }
    }

    pub fn matches(&self, service: &str, username: &str) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            match needle {
                Some(n) => haystack.to_lowercase().contains(n.as_str()),
                None => true,
            }
        }
        contains(service, &self.service) && contains(username, &self.username)
    }
}
