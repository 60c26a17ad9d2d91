//! Brace-delimited byte patterns
//!
//! The recognizer only finds where a pattern ends. It runs a small NFA over
//! the bytes after `{` and keeps the longest accepting prefix:
//!
//! - `BODY`: pattern characters (hex digits, `- | ? [ ] ( )`, whitespace)
//! - `SLASH`: a `/` that must start a comment
//! - `LINE`: inside `//...`; also counts as `BODY` until the newline
//! - `BLOCK`/`STAR`: inside `/*...*/`, `STAR` after one or more `*`
//!
//! A `}` seen while in `BODY` (after at least one element) accepts.

use super::analyzer::Lexer;
use super::error::LexerError;
use crate::hex_pattern::HexPatternParser;
use crate::tokens::Token;
use crate::utils::{Position, Span};

const START: u8 = 1 << 0;
const BODY: u8 = 1 << 1;
const SLASH: u8 = 1 << 2;
const LINE: u8 = 1 << 3;
const BLOCK: u8 = 1 << 4;
const STAR: u8 = 1 << 5;

fn is_pattern_char(b: u8) -> bool {
    b.is_ascii_hexdigit()
        || matches!(
            b,
            b'-' | b'|' | b'?' | b'[' | b']' | b'(' | b')' | b' ' | b'\t' | b'\r' | b'\n'
        )
}

/// Length of the byte pattern at the start of `text`, braces included
pub(crate) fn match_byte_pattern(text: &[u8]) -> Option<usize> {
    if text.first() != Some(&b'{') {
        return None;
    }

    let mut states = START;
    let mut accepted = None;

    for (i, &b) in text.iter().enumerate().skip(1) {
        if states & LINE != 0 {
            states |= BODY;
        }

        let mut next = 0;
        if states & (START | BODY) != 0 {
            if is_pattern_char(b) {
                next |= BODY;
            } else if b == b'/' {
                next |= SLASH;
            }
        }
        if states & BODY != 0 && b == b'}' {
            accepted = Some(i + 1);
        }
        if states & SLASH != 0 {
            match b {
                b'*' => next |= BLOCK,
                b'/' => next |= LINE,
                _ => {}
            }
        }
        if states & LINE != 0 && b != b'\n' {
            next |= LINE;
        }
        if states & BLOCK != 0 {
            next |= if b == b'*' { STAR } else { BLOCK };
        }
        if states & STAR != 0 {
            next |= match b {
                b'*' => STAR,
                b'/' => BODY,
                _ => BLOCK,
            };
        }

        if next == 0 {
            break;
        }
        states = next;
    }

    accepted
}

impl<H: HexPatternParser> Lexer<'_, H> {
    /// Byte pattern when one matches at `{`, else the `{` symbol
    pub(super) fn scan_brace(&mut self, start: Position) -> Result<Token, LexerError> {
        let Some(length) = match_byte_pattern(self.cursor.rest()) else {
            self.cursor.bump();
            return Ok(Token::symbol(b'{', Span::new(start, self.cursor.position())));
        };

        let text = &self.cursor.rest()[..length];
        self.cursor.bump_n(length);
        let span = Span::new(start, self.cursor.position());

        let elements = self
            .hex_parser
            .parse(text)
            .map_err(|error| LexerError::HexPattern {
                line: start.line,
                error,
            })?;
        Ok(Token::hex_string(elements, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::LexicalPreferences;
    use crate::hex_pattern::{HexElement, HexPatternError, Nibble};
    use crate::lexical::test_lexer;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::cell::RefCell;

    fn matched(text: &str) -> Option<&str> {
        match_byte_pattern(text.as_bytes()).map(|len| &text[..len])
    }

    #[test]
    fn test_recognizer_boundaries() {
        assert_eq!(matched("{ AA ?? FF } rest"), Some("{ AA ?? FF }"));
        assert_eq!(matched("{AA}{BB}"), Some("{AA}"));
        assert_eq!(matched("{ [2-4] ( 01 | 02 ) }"), Some("{ [2-4] ( 01 | 02 ) }"));
        assert_eq!(matched("{\n\tAA\r\n}"), Some("{\n\tAA\r\n}"));
    }

    #[test]
    fn test_recognizer_rejects() {
        assert_eq!(matched("{}"), None);
        assert_eq!(matched("{ condition }"), None);
        assert_eq!(matched("{ AA"), None);
        assert_eq!(matched("{ AA / BB }"), None);
        assert_eq!(matched("AA }"), None);
    }

    #[test]
    fn test_recognizer_comments() {
        assert_eq!(matched("{ AA /* } */ BB }"), Some("{ AA /* } */ BB }"));
        assert_eq!(matched("{ AA /** x **/ }"), Some("{ AA /** x **/ }"));
        assert_eq!(matched("{/**/AA}"), Some("{/**/AA}"));
        assert_eq!(matched("{ AA /* open }"), None);

        // A line comment may run past a brace when a later one closes
        assert_eq!(matched("{ AA // x }\n BB }"), Some("{ AA // x }\n BB }"));
        assert_eq!(matched("{ AA // x }\n rule"), Some("{ AA // x }"));
        assert_eq!(matched("{//}"), Some("{//}"));
    }

    #[test]
    fn test_default_service_output() {
        let mut lexer = test_lexer(b"{ AA ?? FF }");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind(), TokenKind::HexString);
        assert_eq!(
            token.as_hex_pattern().unwrap(),
            &[HexElement::byte(0xAA), HexElement::wildcard(), HexElement::byte(0xFF)]
        );
        assert_eq!(token.span().len(), 12);
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_default_service_structure() {
        let token = test_lexer(b"{ 4D [2-] ( 5A | 9? ) }").next_token().unwrap();
        let elements = token.as_hex_pattern().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[1], HexElement::Jump { min: 2, max: None });
        assert_eq!(
            elements[2],
            HexElement::Alternation(vec![
                vec![HexElement::byte(0x5A)],
                vec![HexElement::Byte {
                    high: Nibble::Literal(9),
                    low: Nibble::Wildcard
                }],
            ])
        );
    }

    #[test]
    fn test_service_receives_exact_text() {
        let seen = RefCell::new(Vec::new());
        let recorder = |text: &[u8]| -> Result<Vec<HexElement>, HexPatternError> {
            seen.borrow_mut().push(text.to_vec());
            Ok(Vec::new())
        };

        let source = b"x = { AA /* c */\n  ?? // d\n FF }";
        let mut lexer = Lexer::with_hex_parser(&source[..], recorder, LexicalPreferences::builtin());
        let tokens: Vec<_> = lexer.by_ref().map(Result::unwrap).collect();

        assert_eq!(seen.borrow().as_slice(), &[b"{ AA /* c */\n  ?? // d\n FF }".to_vec()]);
        assert_eq!(tokens[2].kind(), TokenKind::HexString);
        assert_eq!(tokens[2].line(), 1);
        assert_eq!(tokens[3].line(), 3);
        assert_eq!(lexer.line(), 3);
    }

    #[test]
    fn test_service_error_is_propagated_unchanged() {
        let mut lexer = test_lexer(b"\n{ AA A }");
        assert_matches!(
            lexer.next_token(),
            Err(LexerError::HexPattern {
                line: 2,
                error: HexPatternError::IncompleteByte { .. }
            })
        );
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_deeply_nested_pattern_is_an_error() {
        let source = format!("{{ {}AA{} }} x", "(".repeat(20_000), ")".repeat(20_000));
        let mut lexer = test_lexer(source.as_bytes());
        assert_matches!(
            lexer.next_token(),
            Err(LexerError::HexPattern {
                line: 1,
                error: HexPatternError::NestingTooDeep { .. }
            })
        );
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_plain_brace_is_a_symbol() {
        let kinds: Vec<TokenKind> = test_lexer(b"{ condition }")
            .map(|r| r.unwrap().kind())
            .collect();
        assert_eq!(kinds[0], TokenKind::Symbol(b'{'));
        assert_eq!(kinds[2], TokenKind::Symbol(b'}'));
    }
}
