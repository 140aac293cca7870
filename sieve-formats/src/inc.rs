//! Preprocessor `.inc` parser
//!
//! Only `#define KEY value` lines carry translatable content. `#filter`,
//! `#unfilter` and `# comment` lines are skipped.

use crate::error::{ParseError, Result};
use crate::resource::{Entry, Format, Resource};

/// Parse `.inc` source
pub fn parse(source: &str) -> Result<Resource> {
    let mut entries = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(definition) = trimmed.strip_prefix("#define") {
            let definition = definition.trim_start();
            let (key, value) = match definition.find(char::is_whitespace) {
                Some(pos) => (&definition[..pos], definition[pos..].trim()),
                None => (definition, ""),
            };
            if key.is_empty() {
                return Err(ParseError::syntax(idx + 1, "#define without a name"));
            }
            entries.push(Entry::new(key, value));
            continue;
        }

        if trimmed.starts_with('#') {
            continue;
        }

        return Err(ParseError::syntax(idx + 1, "Expected a #define line"));
    }

    Ok(Resource::flat(Format::Inc, entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defines() {
        let resource = parse(
            "# This Source Code Form is subject to the terms\n#filter emptyLines\n\n#define MOZ_LANGPACK_CREATOR mozilla.org\n#define MOZ_LANGPACK_CONTRIBUTORS <em:contributor>Mario Rossi</em:contributor>\n#define EMPTY\n\n#unfilter emptyLines\n",
        )
        .unwrap();

        let entries = &resource.sections[0].entries;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], Entry::new("MOZ_LANGPACK_CREATOR", "mozilla.org"));
        assert_eq!(
            entries[1].value,
            "<em:contributor>Mario Rossi</em:contributor>"
        );
        assert_eq!(entries[2], Entry::new("EMPTY", ""));
    }

    #[test]
    fn test_rejects_plain_text() {
        let err = parse("#define A b\nplain text\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}
