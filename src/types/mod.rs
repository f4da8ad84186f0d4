// passgen shared type definitions
// Each submodule defines types used across the crate.

pub mod character_class;
pub mod credential;
pub mod errors;
pub mod settings;
