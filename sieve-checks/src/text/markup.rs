//! HTML markup stripping
//!
//! Translations regularly embed inline HTML (`<a data-l10n-name="link">`,
//! `<strong>`, comments). Checks only look at the text content: each run of
//! text between tags is kept and the runs are joined with a single space.
//! Character references are decoded; unknown named references such as DTD
//! entities (`&brandShortName;`) are left untouched.

/// Remove tags, comments and declarations, returning the text content
pub fn strip_tags(text: &str) -> String {
    let mut chunks: Vec<String> = Vec::new();
    let mut data = String::new();
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        let after = &rest[lt + 1..];
        match markup_len(after) {
            Some(len) => {
                data.push_str(&rest[..lt]);
                flush(&mut data, &mut chunks);
                rest = &after[len..];
            }
            None => {
                // A lone '<' is plain text
                data.push_str(&rest[..=lt]);
                rest = after;
            }
        }
    }
    data.push_str(rest);
    flush(&mut data, &mut chunks);

    chunks.join(" ")
}

fn flush(data: &mut String, chunks: &mut Vec<String>) {
    if !data.is_empty() {
        chunks.push(decode_entities(data));
        data.clear();
    }
}

/// Length of the markup starting right after a `<`, including the closing `>`
///
/// Returns `None` when the `<` does not open a tag, a comment or a declaration,
/// or when the markup is never closed.
fn markup_len(after: &str) -> Option<usize> {
    if let Some(comment) = after.strip_prefix("!--") {
        return comment.find("-->").map(|end| 3 + end + 3);
    }

    let first = after.chars().next()?;
    let opens_markup = match first {
        '!' | '?' => true,
        '/' => after[1..].starts_with(|c: char| c.is_ascii_alphabetic()),
        c => c.is_ascii_alphabetic(),
    };
    if !opens_markup {
        return None;
    }

    // Find the closing '>' outside of quoted attribute values
    let mut quote: Option<char> = None;
    for (i, c) in after.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') if i > 0 => quote = Some(c),
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Decode numeric references and the common named HTML references
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after.find(';').and_then(|semi| {
            let name = &after[..semi];
            decode_reference(name).map(|c| (c, semi + 1))
        });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Named references for U+00C0..=U+00FF, in code point order
const LATIN1_LETTERS: [&str; 64] = [
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc",
    "uuml", "yacute", "thorn", "yuml",
];

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    if let Some(idx) = LATIN1_LETTERS.iter().position(|n| *n == name) {
        return char::from_u32(0xC0 + idx as u32);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '…',
        "laquo" => '«',
        "raquo" => '»',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "ndash" => '–',
        "mdash" => '—',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "deg" => '°',
        "euro" => '€',
        "middot" => '·',
        _ => return None,
    };
    Some(c)
}
