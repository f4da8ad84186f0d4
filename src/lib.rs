//! passgen: a command-line password generator and credential store.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod cli;
pub mod database;
pub mod platform;
pub mod services;
pub mod types;
