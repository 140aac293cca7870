//! Extract command handler
//!
//! Dumps the string catalog as JSON, which helps when debugging a parser or
//! writing exceptions by hand.

use anyhow::{Context, Result};
use colored::*;
use sieve_checks::{ExtractionService, StandardExtractionService};
use sieve_core::StringCatalog;
use std::path::PathBuf;
use std::process::ExitCode;

use super::load_config;
use crate::config::DataRoot;

/// Handle the extract command
///
/// # Arguments
/// * `root` - The data directory
/// * `output` - File to write; stdout when `None`
pub async fn handle_extract_command(root: &DataRoot, output: Option<PathBuf>) -> Result<ExitCode> {
    let config = load_config(root)?;
    let catalog = StandardExtractionService::new(config.excluded_folders)
        .extract(&config.repo_path)
        .await?;

    let json = catalog_json(&catalog)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!(
                "{}",
                format!("✓ Wrote {} string(s) to {}", catalog.len(), path.display()).green()
            );
        }
        None => print!("{}", json),
    }

    Ok(ExitCode::SUCCESS)
}

fn catalog_json(catalog: &StringCatalog) -> Result<String> {
    let mut json = serde_json::to_string_pretty(catalog).context("Failed to serialize strings")?;
    json.push('\n');
    Ok(json)
}
