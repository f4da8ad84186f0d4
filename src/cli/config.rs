use clap::Subcommand;
use std::io::Write;

use crate::cli::CliContext;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::errors::{PassgenError, SettingsError};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective settings and store location
    Show,
    /// Print the settings file path
    Path,
    /// Set one value by dot key, e.g. `generator.length 16`
    Set {
        key: String,
        /// JSON value; bare words are taken as strings
        value: String,
    },
    /// Restore the default settings
    Reset,
}

/// Reads a command-line value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

pub fn run<W: Write>(ctx: CliContext, command: ConfigCommand, out: &mut W) -> Result<(), PassgenError> {
    let mut engine = ctx.engine;
    match command {
        ConfigCommand::Show => {
            let json = serde_json::to_string_pretty(engine.get_settings()).map_err(|e| {
                SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
            })?;
            writeln!(out, "{}", json)?;
            writeln!(out, "effective backend: {}", ctx.backend)?;
            writeln!(out, "effective store: {}", ctx.database_path.display())?;
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", engine.get_config_path().display())?;
        }
        ConfigCommand::Set { key, value } => {
            engine.set_value(&key, parse_value(&value))?;
            writeln!(out, "{} updated", key)?;
        }
        ConfigCommand::Reset => {
            engine.reset()?;
            writeln!(out, "Settings reset to defaults")?;
        }
    }
    Ok(())
}
