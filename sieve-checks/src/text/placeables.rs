//! Placeable patterns
//!
//! Placeables are replaced at runtime (variables, message references,
//! printf specifiers, DTD entities) and must not reach the spellchecker.
//! Fluent also requires straight double quotes in some expressions, which
//! the quotes check has to ignore.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// A compiled pattern, optionally refusing matches whose opening brace is
/// itself preceded by a brace (`{{ ... }}` is not a Fluent placeable)
struct Pattern {
    regex: Regex,
    guard_double_brace: bool,
}

impl Pattern {
    fn new(pattern: &str) -> Self {
        Self {
            regex: compile(pattern),
            guard_double_brace: false,
        }
    }

    /// The pattern must start with `\{`; a leading optional `(\{)?` group is
    /// added to detect and skip double braces
    fn single_brace(pattern: &str) -> Self {
        Self {
            regex: compile(&format!(r"(\{{)?{}", pattern)),
            guard_double_brace: true,
        }
    }

    fn replace<'t>(&self, text: &'t str, replacement: &str) -> Cow<'t, str> {
        if !self.guard_double_brace {
            return self.regex.replace_all(text, replacement);
        }
        self.regex.replace_all(text, |caps: &Captures| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                replacement.to_string()
            }
        })
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are constants; a failure here is a programming error
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid placeable pattern {pattern}: {e}"))
}

static FLUENT_PLACEABLES: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        // Message references, variables, terms
        Pattern::single_brace(
            r#"\{\s*([\$|-]?[A-Za-z0-9._-]+)(?:[\[(]?[A-Za-z0-9_\-, :"]+[\])])*\s*\}"#,
        ),
        // DATETIME()
        Pattern::new(r"\{\s*DATETIME\(.*\)\s*\}"),
        // Selector of a select expression
        Pattern::new(r"\{?\s*\$[a-zA-Z]+\s*->"),
        // Variant keys
        Pattern::new(r"^\s*\*?\[[a-zA-Z0-9_-]*\]"),
    ]
});

static PROPERTIES_PLACEABLES: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        // printf
        Pattern::new(r"(%(?:[0-9]+\$)?(?:[0-9].)?([sS]))"),
        // webl10n in pdf.js
        Pattern::new(r"\{\[\s?plural\([a-zA-Z]+\)\s?\]\}|\{{1,2}\s?[a-zA-Z_-]+\s?\}{1,2}"),
    ]
});

static DTD_PLACEABLES: LazyLock<Vec<Pattern>> =
    LazyLock::new(|| vec![Pattern::new(r"&([A-Za-z0-9\.]+);")]);

static INI_PLACEABLES: LazyLock<Vec<Pattern>> =
    LazyLock::new(|| vec![Pattern::new(r"%[A-Z_-]+%")]);

static FLUENT_QUOTE_SYNTAX: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        // Parameterized terms
        Pattern::single_brace(
            r#"\{\s*(?:-[A-Za-z0-9._-]+)(?:[\[(]?[A-Za-z0-9_\-, :"]+[\])])*\s*\}"#,
        ),
        // DATETIME() and NUMBER()
        Pattern::new(r"\{\s*(?:DATETIME|NUMBER)(.*)\s*\}"),
        // Special characters and empty string literals
        Pattern::new(r#"\{\s*"[\s{}]?"\s*\}"#),
    ]
});

fn placeables_for(extension: &str) -> Option<&'static [Pattern]> {
    let patterns: &'static LazyLock<Vec<Pattern>> = match extension {
        ".ftl" => &FLUENT_PLACEABLES,
        ".properties" => &PROPERTIES_PLACEABLES,
        ".dtd" => &DTD_PLACEABLES,
        ".ini" => &INI_PLACEABLES,
        _ => return None,
    };
    Some(patterns.as_slice())
}

/// Replace placeables with a space, line by line
///
/// Files without placeable syntax (for example `.inc`) are returned unchanged.
pub fn remove_placeables(text: &str, extension: &str) -> String {
    let Some(patterns) = placeables_for(extension) else {
        return text.to_string();
    };

    text.lines()
        .map(|line| {
            patterns
                .iter()
                .fold(line.to_string(), |acc, p| p.replace(&acc, " ").into_owned())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove Fluent expressions that legitimately contain straight double quotes
pub fn strip_fluent_quote_syntax(text: &str) -> String {
    FLUENT_QUOTE_SYNTAX
        .iter()
        .fold(text.to_string(), |acc, p| p.replace(&acc, "").into_owned())
}
