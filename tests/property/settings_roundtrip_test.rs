//! Property-based tests for Settings serialization round-trip.
//!
//! Any valid Settings value survives JSON serialization, and survives a
//! save/load cycle through the SettingsEngine.

use passgen::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use passgen::types::credential::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use passgen::types::settings::{GeneratorDefaults, Settings, StorageBackend};
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn arb_backend() -> impl Strategy<Value = StorageBackend> {
    prop_oneof![Just(StorageBackend::Sqlite), Just(StorageBackend::Json)]
}

fn arb_generator_defaults() -> impl Strategy<Value = GeneratorDefaults> {
    (
        MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(length, use_uppercase, use_digits, use_special)| GeneratorDefaults {
            length,
            use_uppercase,
            use_digits,
            use_special,
        })
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        arb_backend(),
        proptest::option::of("/[a-zA-Z0-9_./-]{1,40}"),
        arb_generator_defaults(),
    )
        .prop_map(|(backend, database_path, generator)| Settings {
            backend,
            database_path: database_path.map(PathBuf::from),
            generator,
        })
}

// **Property 1: JSON round-trip**
//
// *For any* valid Settings, serializing to JSON and back yields an equal value.
proptest! {
    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }
}

// **Property 2: Engine save/load round-trip**
//
// *For any* valid Settings written through `set_value`, a fresh engine over
// the same file loads the same value.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn settings_engine_roundtrip(settings in arb_settings()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.set_value("backend", serde_json::to_value(settings.backend).unwrap()).unwrap();
        engine
            .set_value("database_path", serde_json::to_value(&settings.database_path).unwrap())
            .unwrap();
        engine
            .set_value("generator", serde_json::to_value(&settings.generator).unwrap())
            .unwrap();

        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), settings);
    }
}
