//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod check;
mod extract;
mod init;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{Config, DataRoot};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the quotes and spelling checks (default)
    Check,
    /// Print the extracted strings as JSON
    Extract {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create the data directory skeleton
    Init,
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `root` - The data directory
///
/// # Returns
/// The process exit code
pub async fn handle_command(command: Commands, root: &DataRoot) -> Result<ExitCode> {
    match command {
        Commands::Check => check::handle_check_command(root).await,
        Commands::Extract { output } => extract::handle_extract_command(root, output).await,
        Commands::Init => init::handle_init_command(root),
    }
}

/// Loads and validates the configuration of the data root
fn load_config(root: &DataRoot) -> Result<Config> {
    let config = Config::load(root.config_file())?;
    config.validate()?;
    Ok(config)
}
