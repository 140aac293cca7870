//! Extraction service
//!
//! Walks a localization repository and collects every translatable string
//! into a [`StringCatalog`]. Files are parsed on tokio's blocking pool.

use anyhow::Result;
use async_trait::async_trait;
use sieve_core::StringCatalog;
use sieve_formats::{Format, Resource, parse_resource};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Top-level folders that are not part of the product being checked
pub const DEFAULT_EXCLUDED_FOLDERS: [&str; 7] = [
    "calendar",
    "chat",
    "editor",
    "extensions",
    "mail",
    "other-licenses",
    "suite",
];

/// Suffix of region files, which hold search and protocol handler settings
const REGION_FILE_SUFFIX: &str = "region.properties";

/// Service trait for string extraction
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Extracts all strings below `repo_path`
    ///
    /// Files that cannot be parsed are logged and skipped, as is a parse
    /// task that panics.
    async fn extract(&self, repo_path: &Path) -> Result<StringCatalog>;
}

/// Standard implementation of ExtractionService
pub struct StandardExtractionService {
    excluded_folders: Vec<String>,
}

impl StandardExtractionService {
    /// Creates a new extraction service
    ///
    /// # Arguments
    /// * `excluded_folders` - Top-level folder names to skip
    pub fn new(excluded_folders: Vec<String>) -> Self {
        Self { excluded_folders }
    }

    /// Lists the supported files below `repo_path`, sorted
    ///
    /// Each item pairs the absolute path with the `/` separated path relative
    /// to `repo_path`.
    pub fn collect_files(&self, repo_path: &Path) -> Vec<(PathBuf, String)> {
        let mut files: Vec<(PathBuf, String)> = WalkDir::new(repo_path)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_folder(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(Format::from_file_name)
                    .is_some()
            })
            .filter_map(|entry| {
                let relative = relative_path(repo_path, entry.path())?;
                Some((entry.into_path(), relative))
            })
            .filter(|(_, relative)| !relative.ends_with(REGION_FILE_SUFFIX))
            .collect();

        files.sort_by(|a, b| a.1.cmp(&b.1));
        files
    }

    fn is_excluded_folder(&self, entry: &DirEntry) -> bool {
        entry.depth() == 1
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.excluded_folders.iter().any(|f| f == name))
    }
}

impl Default for StandardExtractionService {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_FOLDERS.iter().map(|f| f.to_string()).collect())
    }
}

#[async_trait]
impl ExtractionService for StandardExtractionService {
    async fn extract(&self, repo_path: &Path) -> Result<StringCatalog> {
        let files = self.collect_files(repo_path);
        info!("Extracting strings from {} file(s)", files.len());

        let mut tasks: JoinSet<(String, sieve_formats::Result<Resource>)> = JoinSet::new();
        for (path, relative) in files {
            tasks.spawn_blocking(move || {
                let resource = parse_resource(&path);
                (relative, resource)
            });
        }

        let mut parsed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (relative, resource) = match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!("File parsing task failed: {}", e);
                    continue;
                }
            };
            match resource {
                Ok(resource) => parsed.push((relative, resource)),
                Err(e) => warn!("Error parsing {}: {}", relative, e),
            }
        }
        parsed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut catalog = StringCatalog::new();
        for (relative, resource) in &parsed {
            let strings = resource.strings(relative);
            debug!("{}: {} string(s)", relative, strings.len());
            for string in strings {
                catalog.insert(string);
            }
        }

        info!(
            "Extracted {} string(s) from {} file(s)",
            catalog.len(),
            parsed.len()
        );
        Ok(catalog)
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "browser/menu.ftl", "open = Apri\n    .accesskey = A\n");
        write(root, "browser/app.properties", "title=Finestra\n");
        write(root, "browser/region.properties", "browser.search.order.1=Google\n");
        write(root, "toolkit/dialog.dtd", "<!ENTITY ok.label \"OK\">\n");
        write(root, "toolkit/defines.inc", "#define MOZ_LANGPACK_CREATOR mozilla.org\n");
        write(root, "toolkit/crashreporter.ini", "[Strings]\nTitle=Segnalazione\n");
        write(root, "mail/messenger.ftl", "inbox = Posta in arrivo\n");
        write(root, "browser/README.txt", "not a localization file\n");
        dir
    }

    #[test]
    fn test_collect_files() {
        let dir = repo();
        let service = StandardExtractionService::default();

        let files: Vec<String> = service
            .collect_files(dir.path())
            .into_iter()
            .map(|(_, relative)| relative)
            .collect();
        assert_eq!(
            files,
            vec![
                "browser/app.properties",
                "browser/menu.ftl",
                "toolkit/crashreporter.ini",
                "toolkit/defines.inc",
                "toolkit/dialog.dtd",
            ]
        );
    }

    #[test]
    fn test_excluded_folders_only_at_top_level() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "browser/mail/a.ftl", "a = A\n");
        write(dir.path(), "mail/b.ftl", "b = B\n");

        let service = StandardExtractionService::new(vec!["mail".to_string()]);
        let files = service.collect_files(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].1, "browser/mail/a.ftl");
    }

    #[tokio::test]
    async fn test_extract() {
        let dir = repo();
        let service = StandardExtractionService::default();

        let catalog = service.extract(dir.path()).await.unwrap();
        assert_eq!(catalog.get("browser/menu.ftl:open"), Some("Apri"));
        assert_eq!(catalog.get("browser/menu.ftl:open.accesskey"), Some("A"));
        assert_eq!(catalog.get("browser/app.properties:title"), Some("Finestra"));
        assert_eq!(catalog.get("toolkit/dialog.dtd:ok.label"), Some("OK"));
        assert_eq!(
            catalog.get("toolkit/defines.inc:MOZ_LANGPACK_CREATOR"),
            Some("mozilla.org")
        );
        assert_eq!(catalog.get("toolkit/crashreporter.ini:Title"), Some("Segnalazione"));
        assert!(!catalog.contains("mail/messenger.ftl:inbox"));
        assert!(!catalog.contains("browser/region.properties:browser.search.order.1"));
        assert_eq!(catalog.len(), 6);
    }

    #[tokio::test]
    async fn test_no_break_space_continuation() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/menu.ftl", "msg =\n  Prima riga\n \u{a0}» seconda\n");
        write(dir.path(), "a/other.ftl", "ok = Valore\n");

        let catalog = StandardExtractionService::new(vec![])
            .extract(dir.path())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a/other.ftl:ok"), Some("Valore"));
        assert!(catalog.get("a/menu.ftl:msg").unwrap().contains("» seconda"));
    }

    #[tokio::test]
    async fn test_parse_errors_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/good.properties", "key=valore\n");
        write(dir.path(), "a/broken.dtd", "<!ENTITY broken \"never closed\n");

        let catalog = StandardExtractionService::new(vec![])
            .extract(dir.path())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a/good.properties:key"), Some("valore"));
    }
}
