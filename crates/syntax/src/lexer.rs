//! Tokenizer for the Ballerina subset the analyzer recognizes.
//!
//! Comments (`//`) and documentation lines (`#`) are dropped. Everything that
//! is not an identifier, literal or number becomes a punctuation token, so the
//! lexer never rejects input on an unknown character.

use crate::ParseError;
use mqtt_types::OffsetRange;

/// Multi-character punctuators that must stay a single token.
const COMPOUND_PUNCT: &[&str] = &["...", "..<", "->", "=>", "==", "!=", "<=", ">=", "&&", "||"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or keyword (`service`, `mqtt`, `onMessage`)
    Ident,
    /// Quoted identifier (`'type`)
    QuotedIdent,
    /// String literal (`"mqtt/test"`)
    String,
    /// String or XML template (`` string `...` ``)
    Template,
    /// Numeric literal
    Number,
    /// Any other single or compound punctuator
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: OffsetRange,
}

impl Token {
    /// The token's source text.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }

    /// Whether the token can name something (identifier or quoted identifier).
    #[must_use]
    pub const fn is_name(&self) -> bool {
        matches!(self.kind, TokenKind::Ident | TokenKind::QuotedIdent)
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_line(&mut self) {
        self.eat_while(|c| c != '\n');
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split source text into tokens.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();

    while let Some(ch) = cursor.peek() {
        let start = cursor.pos;

        let kind = match ch {
            c if c.is_whitespace() => {
                cursor.bump();
                continue;
            }
            '/' if cursor.peek_second() == Some('/') => {
                cursor.skip_line();
                continue;
            }
            '#' => {
                cursor.skip_line();
                continue;
            }
            '"' => {
                cursor.bump();
                loop {
                    match cursor.bump() {
                        Some('\\') => {
                            cursor.bump();
                        }
                        Some('"') => break,
                        Some('\n') | None => {
                            return Err(ParseError::Unterminated {
                                what: "string literal",
                                offset: start,
                            })
                        }
                        Some(_) => {}
                    }
                }
                TokenKind::String
            }
            '`' => {
                cursor.bump();
                loop {
                    match cursor.bump() {
                        Some('`') => break,
                        None => {
                            return Err(ParseError::Unterminated {
                                what: "template",
                                offset: start,
                            })
                        }
                        Some(_) => {}
                    }
                }
                TokenKind::Template
            }
            '\'' if cursor.peek_second().is_some_and(is_ident_start) => {
                cursor.bump();
                cursor.eat_while(is_ident_continue);
                TokenKind::QuotedIdent
            }
            c if is_ident_start(c) => {
                cursor.eat_while(is_ident_continue);
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => {
                cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
                if cursor.peek() == Some('.') && cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                    cursor.bump();
                    cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
                }
                TokenKind::Number
            }
            _ => {
                match COMPOUND_PUNCT.iter().find(|p| cursor.rest().starts_with(**p)) {
                    Some(p) => cursor.pos += p.len(),
                    None => {
                        cursor.bump();
                    }
                }
                TokenKind::Punct
            }
        };

        tokens.push(Token {
            kind,
            span: OffsetRange::new(start, cursor.pos),
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        tokenize(source)
            .unwrap()
            .iter()
            .map(|t| t.text(source))
            .collect()
    }

    #[test]
    fn test_tokenize_service_header() {
        assert_eq!(
            texts("service on new mqtt:Listener(mqtt:DEFAULT_URL) {}"),
            vec![
                "service",
                "on",
                "new",
                "mqtt",
                ":",
                "Listener",
                "(",
                "mqtt",
                ":",
                "DEFAULT_URL",
                ")",
                "{",
                "}"
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_comments_and_docs() {
        let source = "// leading comment\n# Documentation line\nint x = 1; // trailing\n";
        assert_eq!(texts(source), vec!["int", "x", "=", "1", ";"]);
    }

    #[test]
    fn test_tokenize_literals() {
        let source = r#"string s = "a \"quoted\" // not a comment"; float f = 1.5;"#;
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens[3].kind, TokenKind::String);
        assert_eq!(tokens[3].text(source), r#""a \"quoted\" // not a comment""#);
        assert_eq!(tokens[8].kind, TokenKind::Number);
        assert_eq!(tokens[8].text(source), "1.5");
    }

    #[test]
    fn test_tokenize_compound_punct() {
        assert_eq!(
            texts("check caller->complete();"),
            vec!["check", "caller", "->", "complete", "(", ")", ";"]
        );
        assert_eq!(texts("int... rest"), vec!["int", "...", "rest"]);
    }

    #[test]
    fn test_tokenize_quoted_identifier() {
        let tokens = tokenize("string 'type = \"x\";").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::QuotedIdent);
    }

    #[test]
    fn test_tokenize_unicode_spans() {
        let source = "string s = \"héllo\"; int ü = 1;";
        let tokens = tokenize(source).unwrap();
        let names: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text(source))
            .collect();
        assert_eq!(names, vec!["string", "s", "int", "ü"]);
    }

    #[test]
    fn test_tokenize_unterminated_string() {
        let err = tokenize("string s = \"oops\n;").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unterminated {
                what: "string literal",
                offset: 11
            }
        );
    }

    #[test]
    fn test_tokenize_unterminated_template() {
        let err = tokenize("string s = string `abc").unwrap_err();
        assert_eq!(err.offset(), 18);
    }
}
