//! `.ini` parser
//!
//! Handles `[section]` headers, `key=value` (or `key: value`) pairs and
//! `;`/`#` comment lines. The same parser reads Sieve's own `config.ini`.

use crate::error::{ParseError, Result};
use crate::resource::{Entry, Format, Resource, Section};

/// Parse `.ini` source
pub fn parse(source: &str) -> Result<Resource> {
    let mut sections: Vec<Section> = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| ParseError::syntax(line_no, "Unterminated section header"))?;
            sections.push(Section {
                id: vec![name.trim().to_string()],
                entries: Vec::new(),
            });
            continue;
        }

        let separator = trimmed
            .find(['=', ':'])
            .ok_or_else(|| ParseError::syntax(line_no, "Expected 'key=value'"))?;
        let key = trimmed[..separator].trim_end();
        if key.is_empty() {
            return Err(ParseError::syntax(line_no, "Empty key"));
        }
        let value = trimmed[separator + 1..].trim_start();

        // Keys before the first header land in an anonymous section
        if sections.is_empty() {
            sections.push(Section::default());
        }
        if let Some(section) = sections.last_mut() {
            section.entries.push(Entry::new(key, value));
        }
    }

    Ok(Resource {
        format: Format::Ini,
        sections,
    })
}
