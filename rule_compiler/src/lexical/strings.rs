//! Quoted string mode
//!
//! Content is kept raw: recognized escapes are validated and buffered
//! as written, never decoded.

use super::analyzer::Lexer;
use super::error::LexerError;
use crate::hex_pattern::HexPatternParser;
use crate::tokens::Token;

impl<H: HexPatternParser> Lexer<'_, H> {
    pub(super) fn scan_quoted_string(&mut self) -> Result<Option<Token>, LexerError> {
        let line = self.cursor.line();

        match self.cursor.peek() {
            None => Err(self.end_of_input_error(LexerError::UnterminatedString {
                line: self.open_delimiter.line,
            })),
            Some(b'"') => {
                self.cursor.bump();
                let (content, span) = self.finish_literal();
                Ok(Some(Token::text_string(content, span)))
            }
            Some(b'\n') => {
                self.cursor.bump();
                Err(self.literal_error(LexerError::UnterminatedString { line }))
            }
            Some(b'\\') => self.scan_string_escape(line).map(|()| None),
            Some(_) => {
                let run = self.cursor.eat_while(|b| !matches!(b, b'"' | b'\\' | b'\n'));
                self.push_literal(run)?;
                Ok(None)
            }
        }
    }

    /// `\t`, `\n`, `\"`, `\\` or `\xHH`
    fn scan_string_escape(&mut self, line: u32) -> Result<(), LexerError> {
        let length = match self.cursor.peek_at(1) {
            Some(b't' | b'n' | b'"' | b'\\') => 2,
            Some(b'x')
                if self.cursor.peek_at(2).is_some_and(|b| b.is_ascii_hexdigit())
                    && self.cursor.peek_at(3).is_some_and(|b| b.is_ascii_hexdigit()) =>
            {
                4
            }
            Some(b'\n') => {
                self.cursor.bump_n(2);
                return Err(self.literal_error(LexerError::UnterminatedString { line }));
            }
            Some(escape) => {
                self.cursor.bump_n(2);
                return Err(self.literal_error(LexerError::IllegalEscapeSequence { line, escape }));
            }
            None => {
                self.cursor.bump();
                return Err(self.end_of_input_error(LexerError::UnterminatedString {
                    line: self.open_delimiter.line,
                }));
            }
        };

        let escape = &self.cursor.rest()[..length];
        self.cursor.bump_n(length);
        self.push_literal(escape)
    }
}
