//! passgen: generate random passwords and keep salted hashes of them.

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = passgen::cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp_secs()
        .parse_default_env()
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.run(&mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
