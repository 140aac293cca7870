//! Spellchecker abstraction
//!
//! The spelling check is generic over the [`Speller`] trait so that it can run
//! against a real Hunspell dictionary or an in-memory word list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading a dictionary
#[derive(Debug, Error)]
pub enum SpellerError {
    /// Dictionary file could not be read
    #[error("Failed to read dictionary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hunspell affix or dictionary file is malformed
    #[error("Invalid dictionary '{name}': {message}")]
    Invalid { name: String, message: String },
}

/// Trait for spellcheckers
///
/// # Thread Safety
/// Implementations must be Send + Sync; a speller is shared by reference
/// across the whole run.
pub trait Speller: Send + Sync {
    /// Returns true if `word` is correctly spelled
    ///
    /// `word` may contain a space when checking multi-word names such as
    /// brands.
    fn check(&self, word: &str) -> bool;
}

/// In-memory word list speller
///
/// Follows Hunspell's capitalization rules: a lowercase entry also accepts
/// its title-case and uppercase forms, a title-case entry also accepts its
/// uppercase form.
#[derive(Debug, Clone, Default)]
pub struct WordListSpeller {
    words: HashSet<String>,
}

impl WordListSpeller {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl Speller for WordListSpeller {
    fn check(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }

        if is_title_case(word) || is_upper_case(word) {
            if self.words.contains(&word.to_lowercase()) {
                return true;
            }
        }

        if is_upper_case(word) {
            return self.words.contains(&to_title_case(word));
        }

        false
    }
}

/// Entries of a `.dic` file as `word/FLAGS`, without the word count line
/// and morphological fields
fn dic_entries(source: &str) -> impl Iterator<Item = &str> {
    let mut lines = source.lines().peekable();
    if lines
        .peek()
        .is_some_and(|first| first.trim().parse::<usize>().is_ok())
    {
        lines.next();
    }

    lines
        .map(|line| line.split('\t').next().unwrap_or("").trim())
        .filter(|entry| !stem(entry).is_empty())
}

fn stem(entry: &str) -> &str {
    entry.split('/').next().unwrap_or("").trim()
}

fn is_upper_case(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && word.to_uppercase() == word
}

fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.as_str().to_lowercase() == chars.as_str(),
        _ => false,
    }
}

fn to_title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Hunspell dictionary backed speller
///
/// Loads `<name>.aff` and `<name>.dic` from a dictionaries directory, plus an
/// optional personal word list. Single-word personal entries are added to the
/// dictionary so their affix flags apply; multi-word entries such as brand
/// names are kept in a separate word list.
pub struct HunspellSpeller {
    dictionary: spellbook::Dictionary,
    phrases: WordListSpeller,
}

impl HunspellSpeller {
    /// Load the dictionary `name` from `dir`
    ///
    /// # Arguments
    /// * `dir` - Directory containing the `.aff`/`.dic` pair
    /// * `name` - Dictionary basename, e.g. `it_IT`
    /// * `personal` - Optional extra word list in `.dic` layout
    pub fn load(dir: &Path, name: &str, personal: Option<&Path>) -> Result<Self, SpellerError> {
        let aff = read_lossy(&dir.join(format!("{}.aff", name)))?;
        let dic = read_lossy(&dir.join(format!("{}.dic", name)))?;

        let mut dictionary =
            spellbook::Dictionary::new(&aff, &dic).map_err(|e| SpellerError::Invalid {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        info!("Loaded dictionary '{}'", name);

        let mut phrases = Vec::new();
        if let Some(path) = personal {
            let source = read_lossy(path)?;
            let mut words = 0;
            for entry in dic_entries(&source) {
                let word = stem(entry);
                if word.contains(char::is_whitespace) {
                    phrases.push(word.to_string());
                    continue;
                }
                dictionary.add(entry).map_err(|e| SpellerError::Invalid {
                    name: path.display().to_string(),
                    message: format!("{}: {}", entry, e),
                })?;
                words += 1;
            }
            debug!(
                "Loaded {} personal words and {} phrases from {:?}",
                words,
                phrases.len(),
                path
            );
        }

        Ok(Self {
            dictionary,
            phrases: WordListSpeller::new(phrases),
        })
    }
}

impl Speller for HunspellSpeller {
    fn check(&self, word: &str) -> bool {
        self.phrases.check(word) || self.dictionary.check(word)
    }
}

/// Dictionaries are not always UTF-8; decode lossily rather than fail
fn read_lossy(path: &Path) -> Result<String, SpellerError> {
    let bytes = std::fs::read(path).map_err(|source| SpellerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
