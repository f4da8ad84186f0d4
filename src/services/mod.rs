// passgen services
// Services provide core functionality: generation, hashing, credential storage and settings.

pub mod credential_hasher;
pub mod credential_store;
pub mod json_backend;
pub mod password_generator;
pub mod record_backend;
pub mod settings_engine;
