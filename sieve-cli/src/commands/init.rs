//! Init command handler
//!
//! Creates the data directory skeleton. Existing files are never
//! overwritten, so the command is safe to run on a populated root.

use anyhow::{Context, Result};
use colored::*;
use sieve_checks::store::{QUOTE_EXCEPTIONS_FILE, SPELLING_EXCEPTIONS_FILE, SPELLING_EXCLUSIONS_FILE};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::config::DataRoot;

const CONFIG_TEMPLATE: &str = "\
[default]
# Locale folder of the localization repository
repo_path = /path/to/l10n/it

# Hunspell dictionary and personal word list, inside dictionaries/
#dictionary = it_IT
#personal_dictionary = mozilla_qa_specialized.dic

# Top-level folders of the repository to skip
#excluded_folders = calendar, chat, editor, extensions, mail, other-licenses, suite

# One stop word per line; replaces the built-in Italian list
#stopwords = /path/to/stopwords.txt
";

const EXCLUSIONS_TEMPLATE: &str = "{\n  \"excluded_files\": [],\n  \"excluded_strings\": []\n}\n";

/// Handle the init command
pub fn handle_init_command(root: &DataRoot) -> Result<ExitCode> {
    let store = root.store();
    let exceptions = store.exceptions_dir();
    let dictionaries = root.dictionaries_dir();

    for dir in [dictionaries.as_path(), exceptions, store.errors_dir()] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let files = [
        (root.config_file().to_path_buf(), CONFIG_TEMPLATE),
        (exceptions.join(QUOTE_EXCEPTIONS_FILE), "[]\n"),
        (exceptions.join(SPELLING_EXCEPTIONS_FILE), "{}\n"),
        (exceptions.join(SPELLING_EXCLUSIONS_FILE), EXCLUSIONS_TEMPLATE),
    ];

    for (path, content) in &files {
        if write_new(path, content)? {
            println!("  {} {}", "created".green(), path.display());
        } else {
            println!("  {} {}", "exists ".dimmed(), path.display());
        }
    }

    println!();
    println!("{}", "✓ Data directory ready!".green().bold());
    println!("{}", "Next steps:".bold());
    println!("  1. Set repo_path in {}", root.config_file().display());
    println!(
        "  2. Copy the Hunspell dictionary into {}",
        dictionaries.display()
    );
    println!("  3. Run {}", "sieve check".cyan());

    Ok(ExitCode::SUCCESS)
}

/// Writes `content` unless the file exists; returns whether it was written
fn write_new(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_init_creates_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let root = DataRoot::new(dir.path().to_path_buf(), None);

        handle_init_command(&root).unwrap();

        assert!(dir.path().join("dictionaries").is_dir());
        assert!(dir.path().join("errors").is_dir());

        let store = root.store();
        assert!(store.quote_exceptions().unwrap().0.is_empty());
        assert!(store.spelling_exceptions().unwrap().0.is_empty());
        assert!(store.spelling_exclusions().unwrap().excluded_strings.is_empty());

        let config = Config::load(root.config_file()).unwrap();
        assert_eq!(config.repo_path, Path::new("/path/to/l10n/it"));
        assert_eq!(config.dictionary, "it_IT");
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = DataRoot::new(dir.path().to_path_buf(), None);
        let quotes = dir.path().join("exceptions/quotes.json");
        fs::create_dir_all(quotes.parent().unwrap()).unwrap();
        fs::write(&quotes, "[\"a.ftl:x\"]\n").unwrap();

        handle_init_command(&root).unwrap();

        assert_eq!(fs::read_to_string(&quotes).unwrap(), "[\"a.ftl:x\"]\n");
    }
}
