//! Sieve CLI
//!
//! Checks the translated strings of a localization repository for straight
//! quotes and spelling errors. Running `sieve` without a command runs the
//! checks, exiting with status 1 when errors are found.

mod commands;
mod config;

use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::DataRoot;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sieve")]
#[command(about = "Localization string checker", long_about = None)]
struct Cli {
    /// Data directory holding config/, dictionaries/, exceptions/ and errors/
    #[arg(long, env = "SIEVE_ROOT", default_value = ".")]
    root: PathBuf,

    /// Configuration file (default: <root>/config/config.ini)
    #[arg(long, env = "SIEVE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output (per-string details, tokens)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries the report
    let default_filter = if cli.verbose { "sieve=debug" } else { "sieve=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let root = DataRoot::new(cli.root, cli.config);
    let command = cli.command.unwrap_or(Commands::Check);

    match handle_command(command, &root).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
