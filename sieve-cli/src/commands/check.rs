//! Check command handler
//!
//! Extracts the strings of the configured repository, runs every registered
//! check and prints the errors. The exit code is 1 when any check reports an
//! error.

use anyhow::{Context, Result};
use colored::*;
use sieve_checks::{
    CheckRegistry, ExtractionService, HunspellSpeller, QuoteCheck, SpellingCheck,
    StandardExtractionService, text::StopWords,
};
use sieve_core::{CheckReport, SpellingReport};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

use super::load_config;
use crate::config::{Config, DataRoot};

/// Misspelled words seen at least this many times are listed
const FREQUENT_WORDS_THRESHOLD: usize = 4;

const NO_ERRORS: &str = "No errors found.";

/// Handle the check command
pub async fn handle_check_command(root: &DataRoot) -> Result<ExitCode> {
    let reports = run_checks(root).await?;
    print_reports(&reports)
}

/// Extracts the strings and runs every check, writing the JSON files
async fn run_checks(root: &DataRoot) -> Result<Vec<CheckReport>> {
    let config = load_config(root)?;

    let extraction = StandardExtractionService::new(config.excluded_folders.clone());
    let catalog = extraction.extract(&config.repo_path).await?;

    let registry = build_registry(&config, root)?;
    let store = root.store();
    let reports = registry.run_all(&catalog, &store)?;
    info!("Ran {} check(s) on {} string(s)", reports.len(), catalog.len());

    Ok(reports)
}

/// Registers the quotes and spelling checks
fn build_registry(config: &Config, root: &DataRoot) -> Result<CheckRegistry> {
    let dictionaries = root.dictionaries_dir();

    let personal = dictionaries.join(&config.personal_dictionary);
    let personal = if personal.is_file() {
        Some(personal)
    } else {
        warn!("Personal dictionary {:?} not found, skipping", personal);
        None
    };

    let speller = HunspellSpeller::load(&dictionaries, &config.dictionary, personal.as_deref())
        .with_context(|| format!("Failed to load dictionary '{}'", config.dictionary))?;

    let stop_words = match &config.stopwords {
        Some(path) => StopWords::load(path)?,
        None => StopWords::italian(),
    };

    let mut registry = CheckRegistry::new();
    registry.register(QuoteCheck::new());
    registry.register(SpellingCheck::new(Arc::new(speller), stop_words));
    Ok(registry)
}

fn print_reports(reports: &[CheckReport]) -> Result<ExitCode> {
    let (lines, code) = report_lines(reports)?;
    for line in lines {
        if line == NO_ERRORS {
            println!("{}", line.green());
        } else if line.starts_with("Errors for ") {
            println!("{}", line.red().bold());
        } else {
            println!("{}", line);
        }
    }
    Ok(code)
}

/// The report text and the exit code: 1 when any check found errors
fn report_lines(reports: &[CheckReport]) -> Result<(Vec<String>, ExitCode)> {
    let mut lines = Vec::new();
    for report in reports {
        if let CheckReport::Spelling(spelling) = report {
            lines.extend(spelling_summary(spelling));
        }
    }

    if !reports.iter().any(CheckReport::has_errors) {
        lines.push(NO_ERRORS.to_string());
        return Ok((lines, ExitCode::SUCCESS));
    }

    for report in reports.iter().filter(|r| r.has_errors()) {
        lines.push(format!("Errors for {}:", report.id()));
        lines.push(serde_json::to_string_pretty(&report.errors_json())?);
    }

    Ok((lines, ExitCode::FAILURE))
}

/// Totals and frequent misspellings of the spelling check
fn spelling_summary(report: &SpellingReport) -> Vec<String> {
    let mut lines = Vec::new();

    let total = report.total_errors();
    if total > 0 {
        lines.push(format!(
            "Total number of strings with errors: {}",
            report.errors.len()
        ));
        lines.push(format!("Total number of errors: {}", total));
    }

    let frequent = report.frequent_words(FREQUENT_WORDS_THRESHOLD);
    if !frequent.is_empty() {
        lines.push(format!(
            "Errors and number of occurrences (only above {}):",
            FREQUENT_WORDS_THRESHOLD
        ));
        lines.extend(frequent.iter().map(|(word, count)| format!("{}: {}", word, count)));
    }

    lines
}
