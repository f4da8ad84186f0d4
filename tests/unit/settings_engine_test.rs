//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, validation and reset.

use passgen::services::settings_engine::{validate, SettingsEngine, SettingsEngineTrait};
use passgen::types::errors::SettingsError;
use passgen::types::settings::{Settings, StorageBackend};
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    SettingsEngine::new(Some(dir.path().join("settings.json")))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.backend, StorageBackend::Sqlite);
    assert_eq!(settings.generator.length, 12);
    assert!(!dir.path().join("settings.json").exists(), "load must not create the file");
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("generator.use_special", serde_json::Value::Bool(false))
            .unwrap();
    }

    {
        let mut engine2 = engine_in_temp(&dir);
        let loaded = engine2.load().unwrap();
        assert!(
            !loaded.generator.use_special,
            "set_value must persist the change so a new engine instance reads it back"
        );
    }
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.set_value("backend", serde_json::json!("json")).unwrap();
        engine.set_value("generator.length", serde_json::json!(40)).unwrap();
        engine.reset().unwrap();
        assert_eq!(engine.get_settings(), &Settings::default());
    }

    let mut engine2 = engine_in_temp(&dir);
    assert_eq!(engine2.load().unwrap(), Settings::default());
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let err = engine
        .set_value("generator.length", serde_json::json!("long"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
}

#[test]
fn test_set_value_rejects_unknown_backend() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(engine.set_value("backend", serde_json::json!("postgres")).is_err());
    assert_eq!(engine.get_settings().backend, StorageBackend::Sqlite);
}

#[test]
fn test_set_value_rejects_empty_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(engine.set_value("", serde_json::json!(1)).is_err());
}

#[test]
fn test_load_rejects_out_of_range_length() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"generator": {"length": 500}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_validate_rejects_empty_database_path() {
    let settings = Settings {
        database_path: Some(PathBuf::new()),
        ..Settings::default()
    };
    assert!(validate(&settings).is_err());
    assert!(validate(&Settings::default()).is_ok());
}

#[test]
fn test_config_path_is_the_override() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in_temp(&dir);
    assert_eq!(engine.get_config_path(), dir.path().join("settings.json"));
}

#[test]
fn test_saved_file_is_pretty_json() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("generator.length", serde_json::json!(20)).unwrap();
    let content = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["generator"]["length"], 20);
    assert_eq!(value["backend"], "sqlite");
    assert!(content.contains('\n'));
}
