//! Spelling check
//!
//! Cleans every translated string (markup, placeables, a few characters that
//! glue words together), tokenizes it and asks the speller about each word.
//! Words the speller rejects are still accepted when they are acronyms,
//! domains, keyboard shortcuts, elided forms (`cos’altro`) or part of a
//! two-word name known to the dictionary.

use anyhow::Result;
use sieve_core::domain::catalog::{extension, file_part};
use sieve_core::{CheckReport, SpellingExceptions, SpellingExclusions, SpellingReport, StringCatalog};
use std::sync::Arc;
use tracing::{debug, info};

use crate::check::Check;
use crate::speller::Speller;
use crate::store::CheckStore;
use crate::text::{StopWords, is_punctuation, remove_placeables, strip_tags, tokenize};

/// Substrings that mark a token as a domain name
const DOMAINS: [&str; 2] = ["example.com", "mozilla.org"];

/// Substrings that mark a token as a keyboard shortcut
const ACCESSKEYS: [&str; 3] = ["Alt+", "Cmd+", "Ctrl+"];

/// Reports misspelled words
pub struct SpellingCheck {
    speller: Arc<dyn Speller>,
    stop_words: StopWords,
}

impl SpellingCheck {
    pub fn new(speller: Arc<dyn Speller>, stop_words: StopWords) -> Self {
        Self {
            speller,
            stop_words,
        }
    }

    /// Normalize a message before tokenization
    ///
    /// # Arguments
    /// * `message` - The raw translated string
    /// * `extension` - Extension of the source file, selects the placeable patterns
    pub fn clean_message(message: &str, extension: Option<&str>) -> String {
        let cleaned = strip_tags(message)
            .replace('…', "")
            .replace("\\n", " ")
            .replace('/', " ")
            .replace('=', " = ");

        match extension {
            Some(ext) => remove_placeables(&cleaned, ext),
            None => cleaned,
        }
    }

    /// Evaluate the catalog without touching the filesystem
    pub fn evaluate(
        &self,
        catalog: &StringCatalog,
        exceptions: &SpellingExceptions,
        exclusions: &SpellingExclusions,
    ) -> SpellingReport {
        let mut report = SpellingReport::default();

        for (id, message) in catalog.iter() {
            let ext = extension(id);

            if exclusions.excludes_file(file_part(id)) {
                continue;
            }
            if exclusions.excludes_string(id) {
                report.mark_ignored(id);
                continue;
            }
            if ext == Some(".ftl") && id.ends_with(".style") {
                continue;
            }
            if message.is_empty() || message == "{\"\"}" || message == "{ \"\" }" {
                continue;
            }

            let cleaned = Self::clean_message(message, ext);
            let tokens = tokenize(&cleaned);
            let errors = self.misspelled_tokens(id, &tokens, exceptions, &mut report);

            if errors.is_empty() {
                continue;
            }

            debug!(
                "{}: spelling error {:?}\nOriginal: {}\nCleaned: {}\nTokens: {:?}",
                id, errors, message, cleaned, tokens
            );
            for error in &errors {
                *report.misspelled.entry(error.clone()).or_insert(0) += 1;
            }
            report.errors.insert(id.to_string(), errors);
        }

        report
    }

    fn misspelled_tokens(
        &self,
        id: &str,
        tokens: &[String],
        exceptions: &SpellingExceptions,
        report: &mut SpellingReport,
    ) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if exceptions.allows(id, token) {
                report.mark_ignored(id);
                continue;
            }

            if is_punctuation(token) || self.stop_words.contains(token) {
                continue;
            }

            if self.speller.check(token) || is_excluded_token(token) {
                continue;
            }

            // Elided forms: "cos", "’", "altro"
            if i + 3 <= tokens.len()
                && tokens[i + 1] == "’"
                && self.speller.check(&tokens[i..i + 3].concat())
            {
                continue;
            }

            // Two-word names, looking both ways
            if i + 2 <= tokens.len() && self.speller.check(&tokens[i..i + 2].join(" ")) {
                continue;
            }
            if i >= 1 && self.speller.check(&tokens[i - 1..=i].join(" ")) {
                continue;
            }

            errors.push(token.clone());
        }

        errors
    }

    /// Remove exceptions that are no longer needed
    ///
    /// - strings that disappeared from the catalog
    /// - strings that were never ignored during the run
    /// - token lists that differ from the current errors are replaced with them
    pub fn prune_exceptions(
        exceptions: &SpellingExceptions,
        catalog: &StringCatalog,
        report: &SpellingReport,
    ) -> SpellingExceptions {
        let mut pruned = exceptions.clone();
        pruned
            .0
            .retain(|id, _| catalog.contains(id) && report.ignored.iter().any(|i| i == id));

        for (id, tokens) in pruned.0.iter_mut() {
            if let Some(errors) = report.errors.get(id) {
                if errors != tokens {
                    *tokens = errors.clone();
                }
            }
        }

        pruned
    }
}

/// Tokens that are never reported even when the speller rejects them
fn is_excluded_token(token: &str) -> bool {
    // Acronyms, numbers and symbols
    if token.to_uppercase() == token {
        return true;
    }

    DOMAINS.iter().any(|d| token.contains(d)) || ACCESSKEYS.iter().any(|k| token.contains(k))
}

impl Check for SpellingCheck {
    fn id(&self) -> &'static str {
        "spelling"
    }

    fn run(&self, catalog: &StringCatalog, store: &CheckStore) -> Result<CheckReport> {
        let exceptions = store.spelling_exceptions()?;
        let exclusions = store.spelling_exclusions()?;

        let report = self.evaluate(catalog, &exceptions, &exclusions);
        info!(
            "Spelling check: {} error(s) in {} string(s)",
            report.total_errors(),
            report.errors.len()
        );

        let pruned = Self::prune_exceptions(&exceptions, catalog, &report);
        if pruned.0.len() != exceptions.0.len() {
            debug!(
                "Pruning spelling exceptions: {} -> {}",
                exceptions.0.len(),
                pruned.0.len()
            );
        }
        store.save_spelling_exceptions(&pruned)?;

        let report = CheckReport::Spelling(report);
        store.write_errors(&report)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speller::WordListSpeller;
    use sieve_core::L10nString;

    fn check(words: &[&str]) -> SpellingCheck {
        SpellingCheck::new(
            Arc::new(WordListSpeller::new(words.iter().copied())),
            StopWords::italian(),
        )
    }

    fn catalog(strings: &[(&str, &str)]) -> StringCatalog {
        strings
            .iter()
            .map(|(id, value)| L10nString {
                id: id.to_string(),
                value: value.to_string(),
            })
            .collect()
    }

    fn evaluate(check: &SpellingCheck, catalog: &StringCatalog) -> SpellingReport {
        check.evaluate(
            catalog,
            &SpellingExceptions::default(),
            &SpellingExclusions::default(),
        )
    }

    #[test]
    fn test_clean_message() {
        assert_eq!(
            SpellingCheck::clean_message("Apri <b>{ $file }</b>…", Some(".ftl")),
            "Apri    "
        );
        assert_eq!(
            SpellingCheck::clean_message("riga\\nnuova e/o chiave=valore", Some(".properties")),
            "riga nuova e o chiave = valore"
        );
        assert_eq!(SpellingCheck::clean_message("%s", None), "%s");
    }

    #[test]
    fn test_reports_misspelled_words() {
        let check = check(&["salva", "pagina"]);
        let catalog = catalog(&[
            ("a.ftl:ok", "Salva la pagina"),
            ("a.ftl:bad", "Salva la pagnia"),
        ]);

        let report = evaluate(&check, &catalog);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors["a.ftl:bad"], vec!["pagnia"]);
        assert_eq!(report.misspelled["pagnia"], 1);
    }

    #[test]
    fn test_excluded_tokens() {
        let check = check(&["visita", "premi"]);
        let catalog = catalog(&[
            ("a.properties:acronym", "Visita HTTPS 2024"),
            ("a.properties:domain", "Visita www.example.com"),
            ("a.properties:shortcut", "Premi Ctrl+Shift+K"),
        ]);

        let report = evaluate(&check, &catalog);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn test_elision_and_brand_groups() {
        let check = check(&["cos’altro", "altro", "vuoi", "Common Voice", "usa"]);
        let catalog = catalog(&[
            ("a.ftl:elision", "Cos’altro vuoi"),
            ("a.ftl:brand", "Usa Common Voice"),
        ]);

        let report = evaluate(&check, &catalog);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn test_placeables_are_not_checked() {
        let check = check(&["apri", "chiudi", "scaricati", "file"]);
        let catalog = catalog(&[
            ("a.ftl:var", "Apri { $fileName }"),
            ("a.dtd:entity", "Chiudi &brandShortName;"),
            ("a.properties:printf", "Scaricati %1$S file"),
        ]);

        let report = evaluate(&check, &catalog);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn test_dtd_accented_entities_are_decoded() {
        let check = check(&["perché", "così"]);
        let catalog = catalog(&[("a.dtd:why", "Perch&eacute; cos&igrave;")]);

        let report = evaluate(&check, &catalog);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn test_skips_style_empty_and_excluded() {
        let check = check(&[]);
        let catalog = catalog(&[
            ("a.ftl:dialog.style", "width: 42em"),
            ("a.ftl:empty", ""),
            ("a.ftl:literal", "{ \"\" }"),
            ("devtools/x.properties:k", "qualsiasi parolla"),
            ("b.ftl:skipped", "parolla"),
        ]);
        let exclusions = SpellingExclusions {
            excluded_files: vec!["devtools/".to_string()],
            excluded_strings: vec!["b.ftl:skipped".to_string()],
        };

        let report = check.evaluate(&catalog, &SpellingExceptions::default(), &exclusions);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.ignored, vec!["b.ftl:skipped"]);
    }

    #[test]
    fn test_exception_tokens() {
        let check = check(&["nuovo"]);
        let catalog = catalog(&[("a.ftl:x", "Nuovo Fenix Fenyx")]);
        let exceptions: SpellingExceptions =
            serde_json::from_str(r#"{"a.ftl:x": ["Fenix"]}"#).unwrap();

        let report = check.evaluate(&catalog, &exceptions, &SpellingExclusions::default());
        assert_eq!(report.errors["a.ftl:x"], vec!["Fenyx"]);
        assert_eq!(report.ignored, vec!["a.ftl:x"]);
    }

    #[test]
    fn test_stop_words_skip_speller() {
        let check = check(&["finestra"]);
        let catalog = catalog(&[("a.ftl:x", "Della finestra")]);

        let report = evaluate(&check, &catalog);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_prune_exceptions() {
        let catalog = catalog(&[
            ("a.ftl:kept", "x"),
            ("a.ftl:unused", "y"),
            ("a.ftl:updated", "z"),
        ]);
        let exceptions: SpellingExceptions = serde_json::from_str(
            r#"{
                "a.ftl:kept": ["Fenix"],
                "a.ftl:unused": ["Old"],
                "a.ftl:updated": ["Uno"],
                "gone.ftl:x": ["Fenix"]
            }"#,
        )
        .unwrap();

        let mut report = SpellingReport::default();
        report.mark_ignored("a.ftl:kept");
        report.mark_ignored("a.ftl:updated");
        report
            .errors
            .insert("a.ftl:updated".to_string(), vec!["Due".to_string()]);

        let pruned = SpellingCheck::prune_exceptions(&exceptions, &catalog, &report);
        assert_eq!(pruned.0.len(), 2);
        assert_eq!(pruned.0["a.ftl:kept"], vec!["Fenix"]);
        assert_eq!(pruned.0["a.ftl:updated"], vec!["Due"]);
    }

    #[test]
    fn test_run_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckStore::from_root(dir.path());
        let check = check(&["salva"]);
        let catalog = catalog(&[("a.ftl:x", "Salva tuttto")]);

        let report = check.run(&catalog, &store).unwrap();
        assert!(report.has_errors());

        let errors: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("errors/spelling.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(errors, serde_json::json!({"a.ftl:x": ["tuttto"]}));
        assert!(dir.path().join("exceptions/spelling.json").exists());
    }
}
