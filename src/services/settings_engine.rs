// passgen Settings Engine
// Loads, saves, validates and updates the JSON settings file, and resolves
// where the credential store lives.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::services::password_generator::validate_length;
use crate::types::errors::SettingsError;
use crate::types::settings::{Settings, StorageBackend};

/// Environment variable overriding the configured store location.
pub const DATABASE_ENV_VAR: &str = "PASSGEN_DATABASE";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<Settings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &Settings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &Path;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: PathBuf,
    settings: Settings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses `settings.json` in the platform config directory.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path =
            path_override.unwrap_or_else(|| platform::get_config_dir().join("settings.json"));
        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    /// Returns where the credential store lives.
    ///
    /// Precedence: `PASSGEN_DATABASE`, then `database_path` from the file,
    /// then `backend`'s default file name in the platform data directory.
    pub fn resolve_database_path(&self, backend: StorageBackend) -> PathBuf {
        if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        match &self.settings.database_path {
            Some(path) => path.clone(),
            None => platform::get_data_dir().join(backend.default_file_name()),
        }
    }
}

/// Checks the values a hand-edited file could get wrong.
pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
    validate_length(settings.generator.length)
        .map_err(|e| SettingsError::InvalidValue(format!("generator.length: {}", e)))?;
    if let Some(path) = &settings.database_path {
        if path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue(
                "database_path must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed or out of range, returns an error.
    fn load(&mut self) -> Result<Settings, SettingsError> {
        if !self.config_path.exists() {
            log::debug!("no settings file at {}, using defaults", self.config_path.display());
            self.settings = Settings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        validate(&settings)?;

        log::debug!("loaded settings from {}", self.config_path.display());
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(&self.config_path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Updates an individual setting by dot-notation key path and saves.
    ///
    /// # Examples
    /// - `"backend"` → `"json"`
    /// - `"generator.length"` → `16`
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidValue("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let parts: Vec<&str> = key.split('.').collect();
        let (last, parents) = match parts.split_last() {
            Some(split) => split,
            None => return Err(SettingsError::InvalidValue("Key cannot be empty".to_string())),
        };

        let mut current = &mut json_value;
        for part in parents {
            current = current.get_mut(*part).ok_or_else(|| {
                SettingsError::InvalidValue(format!("Key '{}' not found in settings", key))
            })?;
        }
        match current {
            serde_json::Value::Object(map) if map.contains_key(*last) => {
                map.insert(last.to_string(), value);
            }
            _ => {
                return Err(SettingsError::InvalidValue(format!(
                    "Key '{}' not found in settings",
                    key
                )));
            }
        }

        let new_settings: Settings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        validate(&new_settings)?;

        self.settings = new_settings;
        self.save()?;
        log::info!("setting '{}' updated", key);
        Ok(())
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = Settings::default();
        self.save()
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
