//! Common resource model
//!
//! Every parser produces a [`Resource`]: a list of sections, each holding
//! entries with an id, a serialized value and optional attributes.

use sieve_core::L10nString;
use std::path::Path;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::{dtd, fluent, inc, ini, properties};

/// Supported localization file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Dtd,
    Fluent,
    Inc,
    Ini,
    Properties,
}

impl Format {
    /// All supported formats
    pub const ALL: [Format; 5] = [
        Format::Dtd,
        Format::Fluent,
        Format::Inc,
        Format::Ini,
        Format::Properties,
    ];

    /// File extension, including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            Format::Dtd => ".dtd",
            Format::Fluent => ".ftl",
            Format::Inc => ".inc",
            Format::Ini => ".ini",
            Format::Properties => ".properties",
        }
    }

    /// Detect the format from a file name
    pub fn from_file_name(name: &str) -> Option<Format> {
        Format::ALL
            .into_iter()
            .find(|format| name.ends_with(format.extension()))
    }

    /// Detect the format from a path
    pub fn from_path(path: &Path) -> Option<Format> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Format::from_file_name)
    }
}

/// A single translatable entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub value: String,
    /// Named attributes in source order (Fluent only)
    pub attributes: Vec<(String, String)>,
}

impl Entry {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            attributes: Vec::new(),
        }
    }
}

/// A group of entries; only INI files have named sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub id: Vec<String>,
    pub entries: Vec<Entry>,
}

/// A parsed localization file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub format: Format,
    pub sections: Vec<Section>,
}

impl Resource {
    /// Creates a resource with a single anonymous section
    pub fn flat(format: Format, entries: Vec<Entry>) -> Self {
        Self {
            format,
            sections: vec![Section {
                id: Vec::new(),
                entries,
            }],
        }
    }

    /// Finds a named section (INI)
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.id.len() == 1 && s.id[0] == name)
    }

    /// Looks up the value of `key` in section `section` (INI)
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?
            .entries
            .iter()
            .find(|e| e.id == key)
            .map(|e| e.value.as_str())
    }

    /// Flattens the resource into catalog strings for `file`
    ///
    /// INI entry ids ignore the section name. An entry with attributes only
    /// contributes its own value when that value is not empty; each attribute
    /// is stored as `<entry id>.<attribute>`.
    pub fn strings(&self, file: &str) -> Vec<L10nString> {
        let mut strings = Vec::new();

        for section in &self.sections {
            for entry in &section.entries {
                let entry_id = if self.format == Format::Ini || section.id.is_empty() {
                    entry.id.clone()
                } else {
                    format!("{}.{}", section.id.join("."), entry.id)
                };

                if entry.attributes.is_empty() {
                    strings.push(L10nString::new(file, &entry_id, entry.value.clone()));
                    continue;
                }

                if !entry.value.is_empty() {
                    strings.push(L10nString::new(file, &entry_id, entry.value.clone()));
                }
                for (name, value) in &entry.attributes {
                    let attr_id = format!("{}.{}", entry_id, name);
                    strings.push(L10nString::new(file, &attr_id, value.clone()));
                }
            }
        }

        strings
    }
}

/// Parse source text in the given format
pub fn parse_str(format: Format, source: &str) -> Result<Resource> {
    // Editors occasionally leave a BOM in localization files
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    match format {
        Format::Dtd => dtd::parse(source),
        Format::Fluent => fluent::parse(source),
        Format::Inc => inc::parse(source),
        Format::Ini => ini::parse(source),
        Format::Properties => properties::parse(source),
    }
}

/// Read and parse a localization file, detecting its format from the name
pub fn parse_resource(path: &Path) -> Result<Resource> {
    let format = Format::from_path(path)
        .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;

    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8_lossy(&bytes);

    debug!("Parsing {} as {:?}", path.display(), format);
    parse_str(format, &source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_file_name("menu.ftl"), Some(Format::Fluent));
        assert_eq!(
            Format::from_file_name("region.properties"),
            Some(Format::Properties)
        );
        assert_eq!(Format::from_file_name("defines.inc"), Some(Format::Inc));
        assert_eq!(Format::from_file_name("README.md"), None);
        assert_eq!(Format::from_path(Path::new("a/b/c.dtd")), Some(Format::Dtd));
    }

    #[test]
    fn test_strings_with_attributes() {
        let mut entry = Entry::new("save", "");
        entry.attributes.push(("label".to_string(), "Salva".to_string()));
        entry.attributes.push(("accesskey".to_string(), "S".to_string()));
        let resource = Resource::flat(Format::Fluent, vec![entry, Entry::new("plain", "Testo")]);

        let strings = resource.strings("browser/menu.ftl");
        let ids: Vec<&str> = strings.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "browser/menu.ftl:save.label",
                "browser/menu.ftl:save.accesskey",
                "browser/menu.ftl:plain",
            ]
        );
    }

    #[test]
    fn test_strings_keep_non_empty_value_with_attributes() {
        let mut entry = Entry::new("msg", "Valore");
        entry.attributes.push(("title".to_string(), "Titolo".to_string()));
        let resource = Resource::flat(Format::Fluent, vec![entry]);

        let strings = resource.strings("a.ftl");
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[0].id, "a.ftl:msg");
        assert_eq!(strings[1].id, "a.ftl:msg.title");
    }

    #[test]
    fn test_ini_ids_ignore_section() {
        let resource = parse_str(Format::Ini, "[Strings]\nTitle=Titolo\n").unwrap();
        let strings = resource.strings("crashreporter.ini");
        assert_eq!(strings[0].id, "crashreporter.ini:Title");
        assert_eq!(resource.get("Strings", "Title"), Some("Titolo"));
        assert_eq!(resource.get("Other", "Title"), None);
    }

    #[test]
    fn test_parse_resource_unsupported() {
        let result = parse_resource(Path::new("notes.txt"));
        assert!(matches!(result, Err(ParseError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_resource_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.properties");
        std::fs::write(&path, "\u{feff}key = valore\n").unwrap();

        let resource = parse_resource(&path).unwrap();
        assert_eq!(resource.sections[0].entries[0], Entry::new("key", "valore"));
    }

    #[test]
    fn test_parse_resource_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_resource(&dir.path().join("missing.ftl"));
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
