//! Java-style `.properties` parser
//!
//! Supports `key = value`, `key: value` and `key value` separators, `#` and
//! `!` comments, backslash line continuations and the usual escapes.
//! `\n` is kept as the two literal characters; checks treat it as a line
//! break marker rather than a real newline.

use crate::error::{ParseError, Result};
use crate::resource::{Entry, Format, Resource};

/// Parse `.properties` source
pub fn parse(source: &str) -> Result<Resource> {
    let mut entries = Vec::new();
    let mut lines = source.lines().enumerate().peekable();

    while let Some((idx, line)) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let start_line = idx + 1;
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, start_line)?;
        if key.is_empty() {
            return Err(ParseError::syntax(start_line, "Empty key"));
        }
        let value = unescape(raw_value, start_line)?;

        entries.push(Entry::new(key, value));
    }

    Ok(Resource::flat(Format::Properties, entries))
}

/// A line continues when it ends with an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped separator
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }

    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push_str("\\n"),
            Some('r') => out.push_str("\\r"),
            Some('u') => {
                let unit = read_hex4(&mut chars, line)?;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: combine with a following \uDCxx if present
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
                        let low = read_hex4(&mut lookahead, line)?;
                        if (0xDC00..0xE000).contains(&low) {
                            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                            chars = lookahead;
                            continue;
                        }
                    }
                    out.push('\u{fffd}');
                } else {
                    out.push(char::from_u32(unit).unwrap_or('\u{fffd}'));
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_hex4<I>(chars: &mut I, line: usize) -> Result<u32>
where
    I: Iterator<Item = char>,
{
    let digits: String = chars.take(4).collect();
    if digits.len() != 4 {
        return Err(ParseError::syntax(line, "Truncated \\u escape"));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|_| ParseError::syntax(line, format!("Invalid \\u escape: {}", digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(source: &str) -> Vec<Entry> {
        parse(source).unwrap().sections.remove(0).entries
    }

    #[test]
    fn test_separators() {
        let parsed = entries("a = uno\nb:due\nc tre\nd=\n");
        assert_eq!(parsed[0], Entry::new("a", "uno"));
        assert_eq!(parsed[1], Entry::new("b", "due"));
        assert_eq!(parsed[2], Entry::new("c", "tre"));
        assert_eq!(parsed[3], Entry::new("d", ""));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let parsed = entries("# comment\n! other\n\n   \nkey=value\n");
        assert_eq!(parsed, vec![Entry::new("key", "value")]);
    }

    #[test]
    fn test_continuation() {
        let parsed = entries("long = prima \\\n     seconda\nnext = x\n");
        assert_eq!(parsed[0].value, "prima seconda");
        assert_eq!(parsed[1].id, "next");
    }

    #[test]
    fn test_escaped_backslash_is_not_continuation() {
        let parsed = entries("path = C:\\\\\nnext = x\n");
        assert_eq!(parsed[0].value, "C:\\");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_escapes() {
        let parsed = entries("k = caff\\u00e8\\tok\\nriga\n");
        assert_eq!(parsed[0].value, "caffè\tok\\nriga");
    }

    #[test]
    fn test_surrogate_pair() {
        let parsed = entries("k = \\uD83D\\uDE00\n");
        assert_eq!(parsed[0].value, "😀");
    }

    #[test]
    fn test_escaped_separator_in_key() {
        let parsed = entries("a\\=b = c\n");
        assert_eq!(parsed[0], Entry::new("a=b", "c"));
    }

    #[test]
    fn test_invalid_unicode_escape() {
        let err = parse("ok = 1\nbad = \\uZZZZ\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}
