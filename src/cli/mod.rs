//! CLI routing and command dispatch.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::database::SqliteBackend;
use crate::services::credential_store::CredentialStore;
use crate::services::json_backend::JsonFileBackend;
use crate::services::record_backend::RecordBackend;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::{PassgenError, StoreError};
use crate::types::settings::{Settings, StorageBackend};

pub mod config;
pub mod credential;

/// Store type the command handlers work against.
pub type DynStore = CredentialStore<Box<dyn RecordBackend>>;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub engine: SettingsEngine,
    pub settings: Settings,
    pub backend: StorageBackend,
    pub database_path: PathBuf,
}

impl CliContext {
    /// Opens the configured credential store.
    pub fn open_store(&self) -> Result<DynStore, StoreError> {
        let backend: Box<dyn RecordBackend> = match self.backend {
            StorageBackend::Sqlite => Box::new(SqliteBackend::open(&self.database_path)?),
            StorageBackend::Json => Box::new(JsonFileBackend::open(&self.database_path)?),
        };
        log::debug!("using {} store at {}", self.backend, self.database_path.display());
        Ok(CredentialStore::new(backend))
    }
}

fn parse_backend(s: &str) -> Result<StorageBackend, String> {
    match s.to_ascii_lowercase().as_str() {
        "sqlite" => Ok(StorageBackend::Sqlite),
        "json" => Ok(StorageBackend::Json),
        other => Err(format!("unknown backend '{}', expected sqlite or json", other)),
    }
}

#[derive(Parser, Debug)]
#[command(name = "passgen", version, about = "Generate passwords and keep salted hashes of them")]
pub struct Cli {
    /// Settings file (default: <config dir>/passgen/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Credential store file, overrides settings and PASSGEN_DATABASE
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Store backend: sqlite|json
    #[arg(long, global = true, value_parser = parse_backend)]
    pub backend: Option<StorageBackend>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }

    /// Runs the selected command, writing user-facing output to `out`.
    pub fn run<W: Write>(self, out: &mut W) -> Result<(), PassgenError> {
        let mut engine = SettingsEngine::new(self.config);
        let settings = match engine.load() {
            Ok(settings) => settings,
            // `config set` and `config reset` exist to repair a broken file
            Err(e) if self.command.repairs_settings() => {
                log::warn!(
                    "ignoring unusable settings file {}: {}",
                    engine.get_config_path().display(),
                    e
                );
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };

        let backend = self.backend.unwrap_or(settings.backend);
        let database_path = self
            .database
            .unwrap_or_else(|| engine.resolve_database_path(backend));

        let ctx = CliContext {
            engine,
            settings,
            backend,
            database_path,
        };

        match self.command {
            Commands::Generate(args) => credential::run_generate(&ctx, args, out),
            Commands::Find(args) => credential::run_find(&ctx, args, out),
            Commands::List(args) => credential::run_list(&ctx, args, out),
            Commands::Verify(args) => credential::run_verify(&ctx, args, out),
            Commands::Update(args) => credential::run_update(&ctx, args, out),
            Commands::Delete(args) => credential::run_delete(&ctx, args, out),
            Commands::Config { command } => config::run(ctx, command, out),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new password, optionally saving its hash
    Generate(credential::GenerateArgs),
    /// Search saved credentials by service and/or username
    Find(credential::FindArgs),
    /// Show all saved credentials
    List(credential::ListArgs),
    /// Check a password against the saved hash
    Verify(credential::VerifyArgs),
    /// Replace the saved password hash and description
    Update(credential::UpdateArgs),
    /// Delete a saved credential
    Delete(credential::DeleteArgs),
    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommand,
    },
}

impl Commands {
    /// Whether the command can run on top of default settings when the file is invalid.
    fn repairs_settings(&self) -> bool {
        matches!(
            self,
            Commands::Config {
                command: config::ConfigCommand::Set { .. } | config::ConfigCommand::Reset
            }
        )
    }
}
