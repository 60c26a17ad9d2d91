//! Regular expression mode

use super::analyzer::{Lexer, Mode};
use super::cursor::is_ident_char;
use super::error::LexerError;
use crate::hex_pattern::HexPatternParser;
use crate::tokens::{RegexModifiers, Token};

impl<H: HexPatternParser> Lexer<'_, H> {
    pub(super) fn scan_regex(&mut self) -> Result<Option<Token>, LexerError> {
        let line = self.cursor.line();

        match (self.cursor.peek(), self.cursor.peek_at(1)) {
            (None, _) | (Some(b'\\'), None) => {
                self.cursor.bump();
                Err(self.end_of_input_error(LexerError::UnterminatedRegex {
                    line: self.open_delimiter.line,
                }))
            }
            (Some(b'/'), _) => {
                self.cursor.bump();
                self.close_regex(line).map(Some)
            }
            (Some(b'\n'), _) => {
                self.cursor.bump();
                Err(self.literal_error(LexerError::UnterminatedRegex { line }))
            }
            (Some(b'\\'), Some(b'\n')) => {
                self.cursor.bump_n(2);
                Err(self.literal_error(LexerError::UnterminatedRegex { line }))
            }
            (Some(b'\\'), Some(_)) => {
                let escape = &self.cursor.rest()[..2];
                self.cursor.bump_n(2);
                self.push_literal(escape).map(|()| None)
            }
            (Some(_), _) => {
                let run = self.cursor.eat_while(|b| !matches!(b, b'/' | b'\\' | b'\n'));
                self.push_literal(run).map(|()| None)
            }
        }
    }

    /// Fold the modifier run after the closing delimiter
    fn close_regex(&mut self, line: u32) -> Result<Token, LexerError> {
        let run = self.cursor.eat_while(is_ident_char);

        let mut modifiers = RegexModifiers::empty();
        for &c in run {
            match RegexModifiers::from_char(c) {
                Some(flag) => modifiers |= flag,
                None => {
                    // The literal is closed either way
                    self.buffer.clear();
                    self.enter_mode(Mode::Initial);
                    return Err(LexerError::InvalidRegexModifier { line, modifier: c });
                }
            }
        }

        let (pattern, span) = self.finish_literal();
        Ok(Token::regex(pattern, modifiers, span))
    }
}
