//! Fluent `.ftl` parser
//!
//! A line-oriented reader for Fluent resources. It recognises messages,
//! terms and attributes and returns their patterns as source text: the first
//! line after `=` followed by the continuation block with its common
//! indentation removed. Placeables and select expressions are kept verbatim
//! so checks can match them with patterns.

use crate::error::{ParseError, Result};
use crate::resource::{Entry, Format, Resource};

/// Parse `.ftl` source
pub fn parse(source: &str) -> Result<Resource> {
    let mut entries = Vec::new();
    let mut current: Option<PendingEntry> = None;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;

        if line.trim().is_empty() {
            if let Some(entry) = current.as_mut() {
                entry.push_line("");
            }
            continue;
        }

        // Comments at column 0 terminate the current entry
        if line.starts_with('#') {
            if let Some(entry) = current.take() {
                entries.push(entry.finish()?);
            }
            continue;
        }

        if line.starts_with([' ', '\t']) || line.starts_with('}') {
            let Some(entry) = current.as_mut() else {
                return Err(ParseError::syntax(line_no, "Indented line outside of an entry"));
            };
            match parse_attribute(line.trim_start()) {
                Some((name, value)) => entry.start_attribute(name, value),
                None => entry.push_line(line),
            }
            continue;
        }

        let (id, value) = parse_entry_start(line)
            .ok_or_else(|| ParseError::syntax(line_no, "Expected a message or term"))?;
        if let Some(entry) = current.take() {
            entries.push(entry.finish()?);
        }
        current = Some(PendingEntry::new(id, value, line_no));
    }

    if let Some(entry) = current.take() {
        entries.push(entry.finish()?);
    }

    Ok(Resource::flat(Format::Fluent, entries))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Split `name = rest` into its parts; `name` must be a valid identifier
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let eq = line.find('=')?;
    let name = line[..eq].trim_end();
    if !is_identifier(name) {
        return None;
    }
    Some((name, line[eq + 1..].trim_start()))
}

/// `message-id = value` or `-term-id = value`
fn parse_entry_start(line: &str) -> Option<(&str, &str)> {
    let (term, body) = match line.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let (name, value) = split_assignment(body)?;
    // Keep the leading dash of terms in the id
    let id = if term { &line[..name.len() + 1] } else { name };
    Some((id, value))
}

/// `.attribute = value`
fn parse_attribute(trimmed: &str) -> Option<(&str, &str)> {
    split_assignment(trimmed.strip_prefix('.')?)
}

#[derive(Default)]
struct PatternBuilder {
    first: String,
    block: Vec<String>,
}

impl PatternBuilder {
    fn new(first: &str) -> Self {
        Self {
            first: first.trim_end().to_string(),
            block: Vec::new(),
        }
    }

    fn finish(mut self) -> String {
        while self.block.last().is_some_and(|l| l.trim().is_empty()) {
            self.block.pop();
        }

        let indent = self
            .block
            .iter()
            .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('}'))
            .map(|l| leading_spaces(l))
            .min()
            .unwrap_or(0);

        let lines: Vec<&str> = self
            .block
            .iter()
            .map(|l| {
                let trimmed = l.trim_start();
                if trimmed.is_empty() {
                    ""
                } else if trimmed.starts_with('}') {
                    trimmed.trim_end()
                } else {
                    l[indent.min(leading_spaces(l))..].trim_end()
                }
            })
            .collect();

        match (self.first.is_empty(), lines.is_empty()) {
            (_, true) => self.first,
            (true, false) => lines.join("\n"),
            (false, false) => format!("{}\n{}", self.first, lines.join("\n")),
        }
    }
}

/// Fluent indentation is made of U+0020 only; other blanks are text
fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

struct PendingEntry {
    id: String,
    line: usize,
    value: PatternBuilder,
    attributes: Vec<(String, PatternBuilder)>,
}

impl PendingEntry {
    fn new(id: &str, first: &str, line: usize) -> Self {
        Self {
            id: id.to_string(),
            line,
            value: PatternBuilder::new(first),
            attributes: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        let target = match self.attributes.last_mut() {
            Some((_, attr)) => attr,
            None => &mut self.value,
        };
        // Blank lines before any content of the first line's block are kept;
        // trailing ones are trimmed in finish()
        target.block.push(line.to_string());
    }

    fn start_attribute(&mut self, name: &str, first: &str) {
        self.attributes
            .push((name.to_string(), PatternBuilder::new(first)));
    }

    fn finish(self) -> Result<Entry> {
        let value = self.value.finish();
        let attributes: Vec<(String, String)> = self
            .attributes
            .into_iter()
            .map(|(name, pattern)| (name, pattern.finish()))
            .collect();

        if value.is_empty() && (attributes.is_empty() || self.id.starts_with('-')) {
            return Err(ParseError::syntax(
                self.line,
                format!("Expected a value for '{}'", self.id),
            ));
        }

        Ok(Entry {
            id: self.id,
            value,
            attributes,
        })
    }
}
