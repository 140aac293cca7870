//! Configuration module
//!
//! Sieve reads `config.ini` from its data root. Only the `[default]` section
//! is used:
//!
//! ```ini
//! [default]
//! repo_path = /path/to/l10n/it
//! dictionary = it_IT
//! personal_dictionary = mozilla_qa_specialized.dic
//! excluded_folders = calendar, chat, editor, extensions, mail, other-licenses, suite
//! stopwords = /path/to/stopwords.txt
//! ```

use sieve_checks::{CheckStore, DEFAULT_EXCLUDED_FOLDERS};
use sieve_formats::{Format, ParseError, Resource, parse_str};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Section holding all settings
pub const CONFIG_SECTION: &str = "default";
pub const DEFAULT_DICTIONARY: &str = "it_IT";
pub const DEFAULT_PERSONAL_DICTIONARY: &str = "mozilla_qa_specialized.dic";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file.")]
    Missing(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {0}")]
    Parse(#[from] ParseError),

    #[error("Missing key '{0}' in the [default] section of the configuration file.")]
    MissingKey(&'static str),

    #[error("Path to repository in config file is not a directory.")]
    NotADirectory(PathBuf),
}

/// Layout of the Sieve data directory
///
/// ```text
/// <root>/config/config.ini
/// <root>/dictionaries/
/// <root>/exceptions/
/// <root>/errors/
/// ```
#[derive(Debug, Clone)]
pub struct DataRoot {
    root: PathBuf,
    config_file: PathBuf,
}

impl DataRoot {
    /// Creates a data root
    ///
    /// # Arguments
    /// * `root` - Base directory
    /// * `config_file` - Overrides `<root>/config/config.ini`
    pub fn new(root: PathBuf, config_file: Option<PathBuf>) -> Self {
        let config_file = config_file.unwrap_or_else(|| root.join("config").join("config.ini"));
        Self { root, config_file }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn dictionaries_dir(&self) -> PathBuf {
        self.root.join("dictionaries")
    }

    pub fn store(&self) -> CheckStore {
        CheckStore::from_root(&self.root)
    }
}

/// Settings read from `config.ini`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Locale folder of the localization repository
    pub repo_path: PathBuf,

    /// Hunspell dictionary basename inside the dictionaries directory
    pub dictionary: String,

    /// Extra word list inside the dictionaries directory
    pub personal_dictionary: String,

    /// Top-level folders of the repository to skip
    pub excluded_folders: Vec<String>,

    /// Replacement stop word list
    pub stopwords: Option<PathBuf>,
}

impl Config {
    /// Creates a configuration with defaults for everything but the repository
    pub fn new(repo_path: PathBuf) -> Self {
        Self {
            repo_path,
            dictionary: DEFAULT_DICTIONARY.to_string(),
            personal_dictionary: DEFAULT_PERSONAL_DICTIONARY.to_string(),
            excluded_folders: DEFAULT_EXCLUDED_FOLDERS.iter().map(|f| f.to_string()).collect(),
            stopwords: None,
        }
    }

    /// Loads the configuration file
    ///
    /// # Errors
    /// Returns [`ConfigError::Missing`] if the file does not exist, or an
    /// error if it cannot be read or lacks `repo_path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&source)
    }

    /// Parses the configuration from INI source
    pub fn from_ini(source: &str) -> Result<Self, ConfigError> {
        let resource = parse_str(Format::Ini, source)?;
        Self::from_resource(&resource)
    }

    fn from_resource(resource: &Resource) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            resource
                .get(CONFIG_SECTION, key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let repo_path = value("repo_path").ok_or(ConfigError::MissingKey("repo_path"))?;
        let mut config = Self::new(PathBuf::from(repo_path));

        if let Some(dictionary) = value("dictionary") {
            config.dictionary = dictionary.to_string();
        }
        if let Some(personal) = value("personal_dictionary") {
            config.personal_dictionary = personal.to_string();
        }
        if let Some(folders) = value("excluded_folders") {
            config.excluded_folders = folders
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }
        config.stopwords = value("stopwords").map(PathBuf::from);

        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::NotADirectory`] if `repo_path` is not a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.repo_path.is_dir() {
            return Err(ConfigError::NotADirectory(self.repo_path.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_ini("[default]\nrepo_path = /tmp/it\n").unwrap();

        assert_eq!(config.repo_path, PathBuf::from("/tmp/it"));
        assert_eq!(config.dictionary, "it_IT");
        assert_eq!(config.personal_dictionary, "mozilla_qa_specialized.dic");
        assert_eq!(config.excluded_folders.len(), 7);
        assert!(config.excluded_folders.contains(&"mail".to_string()));
        assert_eq!(config.stopwords, None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_ini(
            "; local settings\n\
             [default]\n\
             repo_path = /tmp/it\n\
             dictionary = it_CH\n\
             personal_dictionary = extra.dic\n\
             excluded_folders = mail , devtools,\n\
             stopwords = stop.txt\n",
        )
        .unwrap();

        assert_eq!(config.dictionary, "it_CH");
        assert_eq!(config.personal_dictionary, "extra.dic");
        assert_eq!(config.excluded_folders, vec!["mail", "devtools"]);
        assert_eq!(config.stopwords, Some(PathBuf::from("stop.txt")));
    }

    #[test]
    fn test_missing_repo_path() {
        let err = Config::from_ini("[default]\ndictionary = it_IT\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("repo_path")));

        let err = Config::from_ini("[other]\nrepo_path = /tmp\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("repo_path")));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("config.ini")).unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration file.");
    }

    #[test]
    fn test_validate_repo_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::new(dir.path().to_path_buf()).validate().is_ok());

        let err = Config::new(dir.path().join("missing"))
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Path to repository in config file is not a directory."
        );
    }

    #[test]
    fn test_data_root_layout() {
        let root = DataRoot::new(PathBuf::from("/data"), None);
        assert_eq!(root.config_file(), Path::new("/data/config/config.ini"));
        assert_eq!(root.dictionaries_dir(), PathBuf::from("/data/dictionaries"));
        assert_eq!(root.store().errors_dir(), Path::new("/data/errors"));

        let root = DataRoot::new(PathBuf::from("/data"), Some(PathBuf::from("/etc/sieve.ini")));
        assert_eq!(root.config_file(), Path::new("/etc/sieve.ini"));
    }
}
