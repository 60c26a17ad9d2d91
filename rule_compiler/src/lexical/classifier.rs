//! Initial-mode token classification
//!
//! Dispatch is on the first byte; every branch then takes the longest run it
//! can, so keyword text followed by an identifier character stays an
//! identifier and `!=` wins over the `!name` sigil.

use super::analyzer::{Lexer, Mode};
use super::cursor::{is_ident_char, is_whitespace};
use super::error::LexerError;
use super::numbers::scan_number;
use crate::config::compile_time::lexical::MAX_IDENTIFIER_LENGTH;
use crate::grammar::{is_integer_function, Keyword};
use crate::hex_pattern::HexPatternParser;
use crate::tokens::{classify_operator, Token, TokenKind};
use crate::utils::{Position, Span};

impl<H: HexPatternParser> Lexer<'_, H> {
    pub(super) fn scan_initial(&mut self) -> Result<Option<Token>, LexerError> {
        let start = self.cursor.position();
        let Some(first) = self.cursor.peek() else {
            return Ok(Some(Token::eof(Span::empty_at(start))));
        };

        match first {
            b if is_whitespace(b) => {
                self.cursor.eat_while(is_whitespace);
                Ok(None)
            }
            b'/' => {
                match self.cursor.peek_at(1) {
                    Some(b'*') => self.open_block_comment(start),
                    Some(b'/') => self.skip_line_comment(),
                    _ => {
                        self.cursor.bump();
                        self.begin_literal(Mode::InRegexPattern, start);
                    }
                }
                Ok(None)
            }
            b'"' => {
                self.cursor.bump();
                self.begin_literal(Mode::InQuotedString, start);
                Ok(None)
            }
            b'{' => self.scan_brace(start).map(Some),
            b'0'..=b'9' => scan_number(&mut self.cursor).map(Some),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.scan_word(start).map(Some),
            b'$' | b'#' | b'@' => self.scan_sigil(first, start).map(Some),
            b'!' if self.cursor.peek_at(1) != Some(b'=') => self.scan_sigil(first, start).map(Some),
            0x20..=0x7e => Ok(Some(self.scan_punctuation(first, start))),
            byte => {
                self.cursor.bump();
                Err(LexerError::NonAsciiByte {
                    line: start.line,
                    byte,
                })
            }
        }
    }

    /// Keyword, sized-read function name or generic identifier
    fn scan_word(&mut self, start: Position) -> Result<Token, LexerError> {
        let word = self.cursor.eat_while(is_ident_char);
        let span = Span::new(start, self.cursor.position());

        if let Some(keyword) = Keyword::from_bytes(word) {
            return Ok(Token::keyword(keyword, span));
        }
        check_identifier_length(word.len(), start.line)?;

        let kind = if is_integer_function(word) {
            TokenKind::IntegerFunction
        } else {
            TokenKind::Identifier
        };
        Ok(Token::identifier(kind, word, span))
    }

    /// `$name`, `$name*`, `#name`, `@name` or `!name`; the name may be empty
    fn scan_sigil(&mut self, sigil: u8, start: Position) -> Result<Token, LexerError> {
        self.cursor.bump();
        let name = self.cursor.eat_while(is_ident_char);
        check_identifier_length(name.len(), start.line)?;

        let kind = match sigil {
            b'$' if self.cursor.peek() == Some(b'*') => {
                self.cursor.bump();
                TokenKind::StringIdentifierWithWildcard
            }
            b'$' => TokenKind::StringIdentifier,
            b'#' => TokenKind::StringCount,
            b'@' => TokenKind::StringOffset,
            _ => TokenKind::StringLength,
        };

        let lexeme = self.cursor.slice_from(start.offset);
        Ok(Token::identifier(kind, lexeme, Span::new(start, self.cursor.position())))
    }

    /// Two-character operator, else the single printable byte itself
    fn scan_punctuation(&mut self, first: u8, start: Position) -> Token {
        let operator = self
            .cursor
            .peek_at(1)
            .and_then(|second| classify_operator(first, second));

        match operator {
            Some(kind) => {
                self.cursor.bump_n(2);
                Token::operator(kind, Span::new(start, self.cursor.position()))
            }
            None => {
                self.cursor.bump();
                Token::symbol(first, Span::new(start, self.cursor.position()))
            }
        }
    }
}

fn check_identifier_length(length: usize, line: u32) -> Result<(), LexerError> {
    if length > MAX_IDENTIFIER_LENGTH {
        return Err(LexerError::IdentifierTooLong { line, length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::grammar::Keyword;
    use crate::lexical::{test_lexer, LexerError};
    use crate::tokens::{Token, TokenKind};
    use assert_matches::assert_matches;

    fn lex(source: &[u8]) -> Vec<Token> {
        test_lexer(source)
            .map(|r| r.expect("unexpected lexical error"))
            .collect()
    }

    fn single(source: &str) -> Token {
        let tokens = lex(source.as_bytes());
        assert_eq!(tokens.len(), 2, "expected one token before Eof in {:?}", source);
        tokens.into_iter().next().unwrap()
    }

    #[test]
    fn test_keyword_precedence_over_identifier() {
        for keyword in Keyword::ALL {
            let text = keyword.as_str();
            assert_eq!(single(text).kind(), TokenKind::Keyword(keyword), "{}", text);

            for continuation in ["a", "Z", "0", "_"] {
                let longer = format!("{}{}", text, continuation);
                let token = single(&longer);
                assert_eq!(token.kind(), TokenKind::Identifier, "{}", longer);
                assert_eq!(token.as_text(), Some(longer.as_bytes()));
            }
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(single("Rule").kind(), TokenKind::Identifier);
        assert_eq!(single("TRUE").kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_integer_functions() {
        for name in ["int8", "int16", "int32", "uint8", "uint16be", "int32be"] {
            let token = single(name);
            assert_eq!(token.kind(), TokenKind::IntegerFunction, "{}", name);
            assert_eq!(token.as_text(), Some(name.as_bytes()));
        }
        for name in ["int64", "uint", "int8le", "uint32bee", "xint8"] {
            assert_eq!(single(name).kind(), TokenKind::Identifier, "{}", name);
        }
    }

    #[test]
    fn test_sigil_identifiers() {
        let cases = [
            ("$a", TokenKind::StringIdentifier),
            ("$", TokenKind::StringIdentifier),
            ("$a_1*", TokenKind::StringIdentifierWithWildcard),
            ("$*", TokenKind::StringIdentifierWithWildcard),
            ("#a", TokenKind::StringCount),
            ("@a", TokenKind::StringOffset),
            ("!a", TokenKind::StringLength),
        ];
        for (text, kind) in cases {
            let token = single(text);
            assert_eq!(token.kind(), kind, "{}", text);
            assert_eq!(token.as_text(), Some(text.as_bytes()));
        }

        // Wildcard only applies to `$`
        let tokens = lex(b"#a*");
        assert_eq!(tokens[0].kind(), TokenKind::StringCount);
        assert_eq!(tokens[1].kind(), TokenKind::Symbol(b'*'));
    }

    #[test]
    fn test_operators_and_symbols() {
        let kinds: Vec<TokenKind> = lex(b"0..5 <= >= == != << >> < > = ! ( ) , . - ~ ;")
            .iter()
            .map(Token::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Integer,
                TokenKind::DotDot,
                TokenKind::Integer,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::Symbol(b'<'),
                TokenKind::Symbol(b'>'),
                TokenKind::Symbol(b'='),
                TokenKind::StringLength,
                TokenKind::Symbol(b'('),
                TokenKind::Symbol(b')'),
                TokenKind::Symbol(b','),
                TokenKind::Symbol(b'.'),
                TokenKind::Symbol(b'-'),
                TokenKind::Symbol(b'~'),
                TokenKind::Symbol(b';'),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bang_equals_beats_sigil() {
        let tokens = lex(b"!=a");
        assert_eq!(tokens[0].kind(), TokenKind::Ne);
        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_non_ascii_bytes() {
        let mut lexer = test_lexer(b"a \xC3\xA9");
        lexer.next_token().unwrap();
        assert_matches!(lexer.next_token(), Err(LexerError::NonAsciiByte { line: 1, byte: 0xC3 }));
        assert_matches!(lexer.next_token(), Err(LexerError::NonAsciiByte { line: 1, byte: 0xA9 }));
        assert!(lexer.next_token().unwrap().is_eof());

        let mut lexer = test_lexer(b"\n\x01");
        assert_matches!(lexer.next_token(), Err(LexerError::NonAsciiByte { line: 2, byte: 0x01 }));
        let mut lexer = test_lexer(b"\x7f");
        assert_matches!(lexer.next_token(), Err(LexerError::NonAsciiByte { line: 1, byte: 0x7f }));
    }

    #[test]
    fn test_identifier_length_limit() {
        use crate::config::compile_time::lexical::MAX_IDENTIFIER_LENGTH;

        let at_limit = "a".repeat(MAX_IDENTIFIER_LENGTH);
        assert_eq!(single(&at_limit).kind(), TokenKind::Identifier);

        let too_long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let mut lexer = test_lexer(too_long.as_bytes());
        assert_matches!(
            lexer.next_token(),
            Err(LexerError::IdentifierTooLong { line: 1, length }) if length == MAX_IDENTIFIER_LENGTH + 1
        );
        // The whole run was consumed
        assert!(lexer.next_token().unwrap().is_eof());

        let sigil = format!("${}", too_long);
        assert_matches!(
            test_lexer(sigil.as_bytes()).next_token(),
            Err(LexerError::IdentifierTooLong { .. })
        );
    }

    #[test]
    fn test_spans_and_eof() {
        let tokens = lex(b"rule  x\n  $a");
        assert_eq!(tokens[0].span().len(), 4);
        assert_eq!(tokens[1].span().start.column, 7);
        assert_eq!(tokens[2].span().start.line, 2);
        assert_eq!(tokens[2].span().start.column, 3);
        assert!(tokens[3].is_eof());
        assert!(tokens[3].span().is_empty());
        assert_eq!(tokens[3].span().start.offset, 12);
    }
}
