//! Word tokenizer
//!
//! A small Treebank-style tokenizer: text is split on whitespace, then
//! punctuation and quotes are peeled off into their own tokens. Periods,
//! apostrophes, `+` and `-` inside a word are kept, so `example.com`,
//! `l'utente` and `Ctrl+Shift+K` stay whole while `cos’altro` becomes
//! `cos`, `’`, `altro`.

/// Characters that always form a token of their own
const SPLIT_CHARS: &[char] = &[
    '"', '«', '»', '“', '”', '‘', '’', '(', ')', '[', ']', '{', '}', '<', '>', ',', ';', '!', '?',
    '…', '@', '#', '$', '%', '&', '`',
];

/// ASCII punctuation; single-character tokens from this set are never words
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Returns true if `token` is a single ASCII punctuation character
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATION.contains(c))
}

/// Split text into word and punctuation tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for chunk in text.split_whitespace() {
        let chars: Vec<char> = chunk.chars().collect();
        let mut word = String::new();

        for (i, &c) in chars.iter().enumerate() {
            let split = SPLIT_CHARS.contains(&c)
                || (c == ':' && !between_digits(&chars, i));
            if split {
                push_word(&mut tokens, &word);
                word.clear();
                tokens.push(c.to_string());
            } else {
                word.push(c);
            }
        }
        push_word(&mut tokens, &word);
    }

    tokens
}

fn between_digits(chars: &[char], i: usize) -> bool {
    i > 0
        && chars[i - 1].is_ascii_digit()
        && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

/// Push a word, splitting leading quotes and trailing quotes or periods
fn push_word(tokens: &mut Vec<String>, word: &str) {
    if word.is_empty() {
        return;
    }

    let mut core = word;
    while let Some(rest) = core.strip_prefix('\'') {
        tokens.push("'".to_string());
        core = rest;
    }

    let mut trailing = Vec::new();
    loop {
        if let Some(rest) = core.strip_suffix("...") {
            trailing.push("...");
            core = rest;
        } else if let Some(rest) = core.strip_suffix('.').filter(|r| !r.is_empty()) {
            trailing.push(".");
            core = rest;
        } else if let Some(rest) = core.strip_suffix('\'') {
            trailing.push("'");
            core = rest;
        } else {
            break;
        }
    }

    if !core.is_empty() {
        tokens.push(core.to_string());
    }
    tokens.extend(trailing.into_iter().rev().map(str::to_string));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn test_sentence() {
        assert_eq!(
            toks("Vuoi salvare le modifiche?"),
            vec!["Vuoi", "salvare", "le", "modifiche", "?"]
        );
    }

    #[test]
    fn test_typographic_apostrophe_is_split() {
        assert_eq!(toks("cos’altro"), vec!["cos", "’", "altro"]);
    }

    #[test]
    fn test_words_with_inner_punctuation() {
        assert_eq!(
            toks("Visita example.com, premi Ctrl+Shift+K."),
            vec!["Visita", "example.com", ",", "premi", "Ctrl+Shift+K", "."]
        );
        assert_eq!(toks("l'utente"), vec!["l'utente"]);
    }

    #[test]
    fn test_quotes_and_brackets() {
        assert_eq!(
            toks("«Ciao» (\"mondo\")"),
            vec!["«", "Ciao", "»", "(", "\"", "mondo", "\"", ")"]
        );
        assert_eq!(toks("'ciao'"), vec!["'", "ciao", "'"]);
    }

    #[test]
    fn test_colon_and_time() {
        assert_eq!(toks("Ore: 10:30"), vec!["Ore", ":", "10:30"]);
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(toks("Attendere..."), vec!["Attendere", "..."]);
        assert_eq!(toks("Attendere…"), vec!["Attendere", "…"]);
        assert_eq!(toks("."), vec!["."]);
    }

    #[test]
    fn test_punctuation() {
        assert!(is_punctuation(","));
        assert!(is_punctuation("'"));
        assert!(!is_punctuation("’"));
        assert!(!is_punctuation("..."));
        assert!(!is_punctuation("a"));
    }
}
