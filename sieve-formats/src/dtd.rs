//! XML `.dtd` entity parser
//!
//! Extracts `<!ENTITY name "value">` declarations. Comments, processing
//! instructions, parameter entities and parameter entity references are
//! skipped.

use crate::error::{ParseError, Result};
use crate::resource::{Entry, Format, Resource};

/// Parse `.dtd` source
pub fn parse(source: &str) -> Result<Resource> {
    let mut cursor = Cursor { source, pos: 0 };
    let mut entries = Vec::new();

    loop {
        cursor.skip_whitespace();
        if cursor.at_end() {
            break;
        }

        if cursor.eat("<!--") {
            cursor.skip_past("-->", "Unterminated comment")?;
        } else if cursor.eat("<?") {
            cursor.skip_past("?>", "Unterminated processing instruction")?;
        } else if cursor.eat("<!ENTITY") {
            if let Some(entry) = parse_entity(&mut cursor)? {
                entries.push(entry);
            }
        } else if cursor.peek() == Some('%') {
            cursor.skip_past(";", "Unterminated parameter entity reference")?;
        } else {
            return Err(ParseError::syntax(cursor.line(), "Unexpected content"));
        }
    }

    Ok(Resource::flat(Format::Dtd, entries))
}

/// Parse the remainder of an entity declaration after `<!ENTITY`
///
/// Returns `None` for parameter entities (`<!ENTITY % name ...>`).
fn parse_entity(cursor: &mut Cursor) -> Result<Option<Entry>> {
    let line = cursor.line();
    cursor.skip_whitespace();

    let parameter = cursor.eat("%");
    cursor.skip_whitespace();

    let name = cursor.take_while(|c| !c.is_whitespace() && c != '"' && c != '\'' && c != '>');
    if name.is_empty() {
        return Err(ParseError::syntax(line, "Entity without a name"));
    }
    cursor.skip_whitespace();

    let value = match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.advance(quote.len_utf8());
            let value = cursor.take_while(|c| c != quote);
            if !cursor.eat(&quote.to_string()) {
                return Err(ParseError::syntax(line, format!("Unterminated value for '{}'", name)));
            }
            value
        }
        _ if parameter => "",
        _ => {
            return Err(ParseError::syntax(line, format!("Entity '{}' has no quoted value", name)));
        }
    };

    // Parameter entities may carry SYSTEM/PUBLIC identifiers before '>'
    let trailing = cursor.take_while(|c| c != '>');
    if !cursor.eat(">") {
        return Err(ParseError::syntax(line, format!("Unterminated entity '{}'", name)));
    }
    if !parameter && !trailing.trim().is_empty() {
        return Err(ParseError::syntax(line, format!("Unexpected content in entity '{}'", name)));
    }

    if parameter {
        return Ok(None);
    }
    Ok(Some(Entry::new(name, value)))
}

struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.source.len());
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.advance(token.len());
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.advance(rest.len() - rest.trim_start().len());
    }

    fn skip_past(&mut self, token: &str, message: &str) -> Result<()> {
        match self.rest().find(token) {
            Some(idx) => {
                self.advance(idx + token.len());
                Ok(())
            }
            None => Err(ParseError::syntax(self.line(), message)),
        }
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.advance(end);
        &rest[..end]
    }

    /// 1-based line number of the current position
    fn line(&self) -> usize {
        self.source[..self.pos].matches('\n').count() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(source: &str) -> Vec<Entry> {
        parse(source).unwrap().sections.remove(0).entries
    }

    #[test]
    fn test_simple_entities() {
        let parsed = entries(
            r#"<!-- LOCALIZATION NOTE: test -->
<!ENTITY window.title "Finestra">
<!ENTITY quoted.single 'Usa "questo"'>
"#,
        );
        assert_eq!(parsed[0], Entry::new("window.title", "Finestra"));
        assert_eq!(parsed[1], Entry::new("quoted.single", "Usa \"questo\""));
    }

    #[test]
    fn test_multiline_value() {
        let parsed = entries("<!ENTITY long \"prima\n   seconda\">\n");
        assert_eq!(parsed[0].value, "prima\n   seconda");
    }

    #[test]
    fn test_skips_parameter_entities() {
        let parsed = entries(
            r#"<!ENTITY % brandDTD SYSTEM "chrome://branding/locale/brand.dtd">
%brandDTD;
<!ENTITY about "Informazioni su &brandShortName;">
"#,
        );
        assert_eq!(parsed, vec![Entry::new("about", "Informazioni su &brandShortName;")]);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = parse("<!ENTITY a \"b\">\n<!-- open").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_unterminated_value() {
        assert!(parse("<!ENTITY a \"never closed>").is_err());
    }

    #[test]
    fn test_garbage() {
        let err = parse("\n\nnot a dtd").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }
}
