//! String catalog domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between the file part and the entry part of a string id
pub const ID_SEPARATOR: char = ':';

/// A single translated string extracted from a localization file
///
/// The id has the form `<relative file path>:<entry id>`, for example
/// `browser/browser/appmenu.ftl:appmenuitem-save-page.label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L10nString {
    pub id: String,
    pub value: String,
}

impl L10nString {
    /// Builds a string from a file path relative to the repository and an entry id
    pub fn new(file: &str, entry_id: &str, value: impl Into<String>) -> Self {
        Self {
            id: format!("{}{}{}", file, ID_SEPARATOR, entry_id),
            value: value.into(),
        }
    }
}

/// Returns the file part of a string id (everything before the first `:`)
pub fn file_part(id: &str) -> &str {
    id.split(ID_SEPARATOR).next().unwrap_or(id)
}

/// Returns the extension (with leading dot) of the file part of a string id
///
/// Dotfiles such as `.ftl` on their own have no extension.
pub fn extension(id: &str) -> Option<&str> {
    let file = file_part(id);
    let name = file.rsplit('/').next().unwrap_or(file);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx..]),
    }
}

/// All strings extracted from a repository, keyed by id
///
/// Backed by an ordered map so that checks and reports iterate in a stable,
/// sorted order regardless of how extraction was scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringCatalog {
    strings: BTreeMap<String, String>,
}

impl StringCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a string, replacing any previous value with the same id
    pub fn insert(&mut self, string: L10nString) {
        self.strings.insert(string.id, string.value);
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.strings.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.strings.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterates over `(id, value)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<L10nString> for StringCatalog {
    fn from_iter<I: IntoIterator<Item = L10nString>>(iter: I) -> Self {
        let mut catalog = StringCatalog::new();
        for string in iter {
            catalog.insert(string);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_id_layout() {
        let s = L10nString::new("browser/menu.ftl", "save.label", "Salva");
        assert_eq!(s.id, "browser/menu.ftl:save.label");
        assert_eq!(file_part(&s.id), "browser/menu.ftl");
        assert_eq!(extension(&s.id), Some(".ftl"));
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(extension("toolkit/chrome/global.dtd:foo"), Some(".dtd"));
        assert_eq!(extension("dir.with.dots/README:foo"), None);
        assert_eq!(extension("dir/.ftl:foo"), None);
        assert_eq!(extension("a/b.properties"), Some(".properties"));
    }

    #[test]
    fn test_catalog_is_sorted() {
        let catalog: StringCatalog = vec![
            L10nString::new("b.ftl", "x", "2"),
            L10nString::new("a.ftl", "y", "1"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = catalog.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a.ftl:y", "b.ftl:x"]);
        assert_eq!(catalog.get("b.ftl:x"), Some("2"));
        assert!(!catalog.contains("c.ftl:z"));
    }

    #[test]
    fn test_catalog_serializes_as_map() {
        let mut catalog = StringCatalog::new();
        catalog.insert(L10nString::new("a.ini", "Title", "Titolo"));

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json, serde_json::json!({"a.ini:Title": "Titolo"}));
    }
}
