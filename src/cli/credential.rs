use clap::Args;
use std::io::Write;

use crate::cli::CliContext;
use crate::services::credential_store::CredentialStoreTrait;
use crate::services::password_generator::PasswordGenerator;
use crate::types::credential::{CredentialSummary, GeneratorOptions};
use crate::types::errors::{PassgenError, StoreError};

/// Service name used when `generate --save` is given none.
pub const UNKNOWN_SERVICE: &str = "unknown_service";
/// Username used when `generate --save` is given none.
pub const UNKNOWN_USER: &str = "unknown_user";

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("invalid format '{}', must be one of: table, json", other)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Class switches shared by `generate` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneratorFlags {
    /// Password length (4-100, default from settings)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Include uppercase letters even if settings turn them off
    #[arg(long, conflicts_with = "no_uppercase")]
    pub uppercase: bool,

    /// Leave uppercase letters out
    #[arg(long)]
    pub no_uppercase: bool,

    /// Include digits even if settings turn them off
    #[arg(long, conflicts_with = "no_digits")]
    pub digits: bool,

    /// Leave digits out
    #[arg(long)]
    pub no_digits: bool,

    /// Include special characters even if settings turn them off
    #[arg(long, conflicts_with = "no_special")]
    pub special: bool,

    /// Leave special characters out
    #[arg(long)]
    pub no_special: bool,
}

/// An explicit `--x` or `--no-x` wins over the settings default.
fn switch(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

impl GeneratorFlags {
    /// Settings defaults with the command-line switches applied on top.
    pub fn resolve(&self, ctx: &CliContext) -> GeneratorOptions {
        let defaults = ctx.settings.generator.to_options();
        GeneratorOptions {
            length: self.length.unwrap_or(defaults.length),
            use_uppercase: switch(self.uppercase, self.no_uppercase, defaults.use_uppercase),
            use_digits: switch(self.digits, self.no_digits, defaults.use_digits),
            use_special: switch(self.special, self.no_special, defaults.use_special),
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub generator: GeneratorFlags,

    /// Save the hash of the generated password
    #[arg(long)]
    pub save: bool,

    /// Service the password belongs to
    #[arg(short, long, requires = "save")]
    pub service: Option<String>,

    /// Username the password belongs to
    #[arg(short, long, requires = "save")]
    pub username: Option<String>,

    /// Description stored with the record
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Case-insensitive substring of the service
    #[arg(short, long)]
    pub service: Option<String>,

    /// Case-insensitive substring of the username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Output format: table|json
    #[arg(long, default_value = "table", value_parser = parse_format)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table", value_parser = parse_format)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[arg(short, long)]
    pub service: String,

    #[arg(short, long)]
    pub username: String,

    /// Password to check
    #[arg(short, long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(short, long)]
    pub service: String,

    #[arg(short, long)]
    pub username: String,

    /// New password; a fresh one is generated when omitted
    #[arg(short, long, conflicts_with_all = [
            "length", "uppercase", "no_uppercase", "digits", "no_digits", "special", "no_special",
        ])]
    pub password: Option<String>,

    #[command(flatten)]
    pub generator: GeneratorFlags,

    /// New description (replaces the old one)
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(short, long)]
    pub service: String,

    #[arg(short, long)]
    pub username: String,
}

pub fn run_generate<W: Write>(
    ctx: &CliContext,
    args: GenerateArgs,
    out: &mut W,
) -> Result<(), PassgenError> {
    let options = args.generator.resolve(ctx);
    let password = PasswordGenerator::new().generate(&options)?;
    writeln!(out, "Generated password: {}", password)?;

    if !args.save {
        return Ok(());
    }

    let service = args.service.as_deref().unwrap_or(UNKNOWN_SERVICE);
    let username = args.username.as_deref().unwrap_or(UNKNOWN_USER);
    let mut store = ctx.open_store()?;
    match store.save(service, username, &password, &args.description) {
        Ok(id) => {
            writeln!(out, "Password saved (ID: {})", id)?;
            Ok(())
        }
        Err(e @ StoreError::DuplicateRecord { .. }) => {
            writeln!(out, "Use another service/username pair, `update`, or delete the record first")?;
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_find<W: Write>(ctx: &CliContext, args: FindArgs, out: &mut W) -> Result<(), PassgenError> {
    let store = ctx.open_store()?;
    let found = store.find(args.service.as_deref(), args.username.as_deref())?;
    print_summaries(&found, args.format, out)
}

pub fn run_list<W: Write>(ctx: &CliContext, args: ListArgs, out: &mut W) -> Result<(), PassgenError> {
    let store = ctx.open_store()?;
    let all = store.list()?;
    print_summaries(&all, args.format, out)
}

pub fn run_verify<W: Write>(
    ctx: &CliContext,
    args: VerifyArgs,
    out: &mut W,
) -> Result<(), PassgenError> {
    let store = ctx.open_store()?;
    if store.verify(&args.service, &args.username, &args.password)? {
        writeln!(out, "Password is correct")?;
    } else {
        writeln!(out, "Password is incorrect or record not found")?;
    }
    Ok(())
}

pub fn run_update<W: Write>(
    ctx: &CliContext,
    args: UpdateArgs,
    out: &mut W,
) -> Result<(), PassgenError> {
    let password = match args.password {
        Some(password) => password,
        None => {
            let options = args.generator.resolve(ctx);
            let password = PasswordGenerator::new().generate(&options)?;
            writeln!(out, "Generated password: {}", password)?;
            password
        }
    };

    let mut store = ctx.open_store()?;
    let id = store.update(&args.service, &args.username, &password, &args.description)?;
    writeln!(out, "Password for {}/{} updated (ID: {})", args.service, args.username, id)?;
    Ok(())
}

pub fn run_delete<W: Write>(
    ctx: &CliContext,
    args: DeleteArgs,
    out: &mut W,
) -> Result<(), PassgenError> {
    let mut store = ctx.open_store()?;
    if store.delete(&args.service, &args.username)? {
        writeln!(out, "Password for {}/{} deleted", args.service, args.username)?;
    } else {
        writeln!(out, "Password for {}/{} not found", args.service, args.username)?;
    }
    Ok(())
}

fn print_summaries<W: Write>(
    summaries: &[CredentialSummary],
    format: OutputFormat,
    out: &mut W,
) -> Result<(), PassgenError> {
    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(summaries)
            .map_err(|e| PassgenError::Io(std::io::Error::other(e)))?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    if summaries.is_empty() {
        writeln!(out, "No passwords found")?;
        return Ok(());
    }

    writeln!(out, "Found {} record(s)", summaries.len())?;
    for (i, item) in summaries.iter().enumerate() {
        writeln!(out, "{}. Service: {}", i + 1, item.service)?;
        writeln!(out, "   Username: {}", item.username)?;
        if !item.description.is_empty() {
            writeln!(out, "   Description: {}", item.description)?;
        }
    }
    Ok(())
}
