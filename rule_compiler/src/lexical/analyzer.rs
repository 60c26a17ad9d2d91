//! Lexer instance and mode controller
//!
//! A [`Lexer`] owns all of its state: cursor, line counter, active [`Mode`],
//! literal buffer, byte-pattern service and metrics. Each call to
//! [`Lexer::next_token`] runs the scanner of the active mode until one
//! lexeme completes a token or fails. Whitespace, comments and partial
//! literal runs produce nothing and the loop continues.

use std::collections::BTreeMap;

use super::cursor::Cursor;
use super::error::LexerError;
use crate::config::compile_time::lexical::MAX_LITERAL_SIZE;
use crate::config::runtime::LexicalPreferences;
use crate::hex_pattern::{HexParser, HexPatternParser};
use crate::logging::codes;
use crate::tokens::{Token, TokenClass, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};

/// Lexical modes; exactly one is active and `Initial` is the start mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Initial,
    InQuotedString,
    InRegexPattern,
    InBlockComment,
}

/// Per-instance lexical metrics
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    /// Only filled when detailed metrics are enabled
    pub tokens_by_class: BTreeMap<TokenClass, usize>,
    pub max_literal_length: usize,
    pub comment_count: usize,
    pub error_count: usize,
    pub mode_transitions: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if preferences.collect_detailed_metrics {
            *self.tokens_by_class.entry(token.token_class()).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_literal_length(&mut self, length: usize) {
        self.max_literal_length = self.max_literal_length.max(length);
    }

    pub fn count_for(&self, class: TokenClass) -> usize {
        self.tokens_by_class.get(&class).copied().unwrap_or(0)
    }
}

pub struct Lexer<'a, H = HexParser> {
    pub(super) cursor: Cursor<'a>,
    pub(super) mode: Mode,
    /// Accumulated content of the string or regex being scanned
    pub(super) buffer: Vec<u8>,
    /// Opening delimiter of the current string, regex or block comment
    pub(super) open_delimiter: Position,
    pub(super) hex_parser: H,
    pub(super) preferences: LexicalPreferences,
    pub(super) metrics: LexicalMetrics,
    eof_yielded: bool,
}

impl<'a> Lexer<'a, HexParser> {
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_hex_parser(source, HexParser, LexicalPreferences::default())
    }

    pub fn with_preferences(source: &'a [u8], preferences: LexicalPreferences) -> Self {
        Self::with_hex_parser(source, HexParser, preferences)
    }
}

impl<'a, H: HexPatternParser> Lexer<'a, H> {
    /// Lexer that hands byte patterns to a custom service
    pub fn with_hex_parser(source: &'a [u8], hex_parser: H, preferences: LexicalPreferences) -> Self {
        Self {
            cursor: Cursor::new(source),
            mode: Mode::Initial,
            buffer: Vec::new(),
            open_delimiter: Position::start(),
            hex_parser,
            preferences,
            metrics: LexicalMetrics::default(),
            eof_yielded: false,
        }
    }

    /// Produce the next token, or the error for the next offending lexeme.
    /// End of input in `Initial` mode yields an `Eof` token on every call.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        loop {
            let lexeme_start = self.cursor.position();
            let step = match self.mode {
                Mode::Initial => self.scan_initial(),
                Mode::InQuotedString => self.scan_quoted_string(),
                Mode::InRegexPattern => self.scan_regex(),
                Mode::InBlockComment => self.scan_block_comment(),
            };

            match step {
                Ok(Some(token)) => {
                    self.metrics.record_token(&token, &self.preferences);
                    return Ok(token);
                }
                Ok(None) => continue,
                Err(error) => {
                    self.report_error(&error, lexeme_start);
                    return Err(error);
                }
            }
        }
    }

    /// Collect every token up to and including `Eof`; stops at the first error
    pub fn tokenize(&mut self) -> Result<TokenStream, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed successfully",
            "token_count" => tokens.len(),
            "lines" => self.cursor.line(),
            "keywords" => self.metrics.count_for(TokenClass::Keyword),
            "identifiers" => self.metrics.count_for(TokenClass::Identifier),
            "literals" => self.metrics.count_for(TokenClass::Literal),
            "comments" => self.metrics.comment_count,
            "max_literal_length" => self.metrics.max_literal_length
        );

        Ok(TokenStream::new(tokens))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current 1-based line
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub(super) fn enter_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        if self.preferences.trace_modes {
            log_debug!("Lexical mode transition",
                "from" => format!("{:?}", self.mode),
                "to" => format!("{:?}", mode),
                "line" => self.cursor.line()
            );
        }
        self.metrics.mode_transitions += 1;
        self.mode = mode;
    }

    /// Enter a buffered literal mode; `start` is the opening delimiter
    pub(super) fn begin_literal(&mut self, mode: Mode, start: Position) {
        self.buffer.clear();
        self.open_delimiter = start;
        self.enter_mode(mode);
    }

    pub(super) fn push_literal(&mut self, bytes: &[u8]) -> Result<(), LexerError> {
        self.buffer.extend_from_slice(bytes);
        if self.buffer.len() > MAX_LITERAL_SIZE {
            let length = self.buffer.len();
            return Err(self.literal_error(LexerError::LiteralTooLong {
                line: self.open_delimiter.line,
                length,
            }));
        }
        Ok(())
    }

    /// Close the current literal: take its content and return to `Initial`
    pub(super) fn finish_literal(&mut self) -> (Vec<u8>, Span) {
        let content = std::mem::take(&mut self.buffer);
        self.metrics.record_literal_length(content.len());
        self.enter_mode(Mode::Initial);
        (content, Span::new(self.open_delimiter, self.cursor.position()))
    }

    /// Error inside a string or regex; the partial content is discarded and
    /// the mode is left or kept according to the preferences
    pub(super) fn literal_error(&mut self, error: LexerError) -> LexerError {
        self.buffer.clear();
        if self.preferences.reset_mode_on_error {
            self.enter_mode(Mode::Initial);
        }
        error
    }

    /// End of input inside a buffered construct always returns to `Initial`
    pub(super) fn end_of_input_error(&mut self, error: LexerError) -> LexerError {
        self.buffer.clear();
        self.enter_mode(Mode::Initial);
        error
    }

    fn report_error(&mut self, error: &LexerError, lexeme_start: Position) {
        self.metrics.error_count += 1;

        let span = Span::new(lexeme_start, self.cursor.position());
        log_error!(error.error_code(), &error.message(),
            span = span,
            "line" => error.line(),
            "mode" => format!("{:?}", self.mode)
        );
    }
}

impl<H: HexPatternParser> Iterator for Lexer<'_, H> {
    type Item = Result<Token, LexerError>;

    /// Yields `Eof` once, then `None`
    fn next(&mut self) -> Option<Self::Item> {
        if self.eof_yielded {
            return None;
        }
        let result = self.next_token();
        if matches!(&result, Ok(token) if token.is_eof()) {
            self.eof_yielded = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Keyword;
    use crate::hex_pattern::{HexElement, HexPatternError};
    use crate::lexical::test_lexer;
    use crate::tokens::{TokenKind, TokenValue};
    use assert_matches::assert_matches;

    fn kinds(source: &str) -> Vec<TokenKind> {
        test_lexer(source.as_bytes())
            .map(|r| r.expect("unexpected lexical error").kind())
            .collect()
    }

    fn first_error(source: &str) -> LexerError {
        test_lexer(source.as_bytes())
            .find_map(Result::err)
            .expect("expected a lexical error")
    }

    fn stuck_preferences() -> LexicalPreferences {
        LexicalPreferences {
            reset_mode_on_error: false,
            collect_detailed_metrics: true,
            trace_modes: false,
        }
    }

    #[test]
    fn test_rule_skeleton() {
        let source = "rule demo : tag {\n  strings:\n    $a = \"abc\" nocase\n  condition:\n    #a > 2 and @a[1] <= 0x100\n}";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Keyword(Keyword::Rule),
                TokenKind::Identifier,
                TokenKind::Symbol(b':'),
                TokenKind::Identifier,
                TokenKind::Symbol(b'{'),
                TokenKind::Keyword(Keyword::Strings),
                TokenKind::Symbol(b':'),
                TokenKind::StringIdentifier,
                TokenKind::Symbol(b'='),
                TokenKind::TextString,
                TokenKind::Keyword(Keyword::Nocase),
                TokenKind::Keyword(Keyword::Condition),
                TokenKind::Symbol(b':'),
                TokenKind::StringCount,
                TokenKind::Symbol(b'>'),
                TokenKind::Integer,
                TokenKind::Keyword(Keyword::And),
                TokenKind::StringOffset,
                TokenKind::Symbol(b'['),
                TokenKind::Integer,
                TokenKind::Symbol(b']'),
                TokenKind::Le,
                TokenKind::Integer,
                TokenKind::Symbol(b'}'),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_eof_is_yielded_once_by_iterator() {
        let mut lexer = test_lexer(b"");
        assert_matches!(lexer.next(), Some(Ok(token)) if token.is_eof());
        assert!(lexer.next().is_none());

        // Direct calls keep answering Eof
        let mut lexer = test_lexer(b"  ");
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_iterator_continues_after_error() {
        let results: Vec<_> = test_lexer(b"a \x80 b").collect();
        assert_eq!(results.len(), 4);
        assert_matches!(results[1], Err(LexerError::NonAsciiByte { line: 1, byte: 0x80 }));
        assert_matches!(&results[2], Ok(token) if token.as_text() == Some(&b"b"[..]));
    }

    #[test]
    fn test_line_numbers_follow_lexeme_start() {
        let source = "a\n\"s\"\n/r/\n{ AA\n BB }\n/* x\n y */ b\n// c\nc";
        let lines: Vec<(TokenKind, u32)> = test_lexer(source.as_bytes())
            .map(|r| r.unwrap())
            .map(|t| (t.kind(), t.line()))
            .collect();
        assert_eq!(
            lines,
            vec![
                (TokenKind::Identifier, 1),
                (TokenKind::TextString, 2),
                (TokenKind::Regex, 3),
                (TokenKind::HexString, 4),
                (TokenKind::Identifier, 7),
                (TokenKind::Identifier, 9),
                (TokenKind::Eof, 9),
            ]
        );
    }

    #[test]
    fn test_string_error_resets_mode_by_default() {
        let mut lexer = test_lexer(b"\"abc\nx\"");
        assert_matches!(lexer.next_token(), Err(LexerError::UnterminatedString { line: 1 }));
        assert_eq!(lexer.mode(), Mode::Initial);

        // `x` is lexed in Initial mode, the trailing quote opens a new string
        assert_eq!(lexer.next_token().unwrap().as_text(), Some(&b"x"[..]));
        assert_matches!(lexer.next_token(), Err(LexerError::UnterminatedString { line: 2 }));
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_string_error_can_leave_mode_stuck() {
        let mut lexer = Lexer::with_preferences(b"\"abc\nx\"", stuck_preferences());
        assert_matches!(lexer.next_token(), Err(LexerError::UnterminatedString { line: 1 }));
        assert_eq!(lexer.mode(), Mode::InQuotedString);

        // Still inside the string: `x"` closes it
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind(), TokenKind::TextString);
        assert_eq!(token.as_text(), Some(&b"x"[..]));
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_regex_error_modes() {
        let mut lexer = test_lexer(b"/ab\nc/");
        assert_matches!(lexer.next_token(), Err(LexerError::UnterminatedRegex { line: 1 }));
        assert_eq!(lexer.mode(), Mode::Initial);

        let mut lexer = Lexer::with_preferences(b"/ab\nc/", stuck_preferences());
        assert_matches!(lexer.next_token(), Err(LexerError::UnterminatedRegex { line: 1 }));
        assert_eq!(lexer.mode(), Mode::InRegexPattern);
        assert_eq!(lexer.next_token().unwrap().as_regex().unwrap().0, b"c");
    }

    #[test]
    fn test_end_of_input_inside_literals() {
        assert_matches!(first_error("\"abc"), LexerError::UnterminatedString { line: 1 });
        assert_matches!(first_error("x /abc"), LexerError::UnterminatedRegex { line: 1 });
        assert_matches!(first_error("a\n/* open\n"), LexerError::UnterminatedComment { line: 2 });

        // End of input always resets, even when errors keep the mode
        let mut lexer = Lexer::with_preferences(b"\"abc", stuck_preferences());
        assert!(lexer.next_token().is_err());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_custom_hex_service() {
        let service = |text: &[u8]| {
            if text.contains(&b'?') {
                Err(HexPatternError::UnexpectedCharacter { byte: b'?', offset: 0 })
            } else {
                Ok(vec![HexElement::byte(text.len() as u8)])
            }
        };

        let mut lexer = Lexer::with_hex_parser(b"{ AA } { ?? }", service, LexicalPreferences::builtin());
        let token = lexer.next_token().unwrap();
        assert_eq!(token.value(), &TokenValue::HexPattern(vec![HexElement::byte(6)]));
        assert_matches!(
            lexer.next_token(),
            Err(LexerError::HexPattern {
                line: 1,
                error: HexPatternError::UnexpectedCharacter { byte: b'?', offset: 0 }
            })
        );
    }

    #[test]
    fn test_fresh_instances_are_deterministic() {
        let source = b"rule a { strings: $h = { 4D 5A [2-4] ( 90 | CC ) } condition: $h at 0 and /x+/is }";
        let first: Vec<_> = test_lexer(source).collect();
        let second: Vec<_> = test_lexer(source).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(Result::is_ok));
    }

    #[test]
    fn test_lexer_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        assert_send(&Lexer::new(b"rule"));
    }

    #[test]
    fn test_metrics() {
        let mut lexer = test_lexer(b"rule a /* c */ { condition: \"long string\" // x\n }");
        let stream = lexer.tokenize().unwrap();
        let metrics = lexer.metrics();

        assert_eq!(metrics.total_tokens, stream.len());
        assert_eq!(metrics.count_for(TokenClass::Keyword), 2);
        assert_eq!(metrics.count_for(TokenClass::Literal), 1);
        assert_eq!(metrics.comment_count, 2);
        assert_eq!(metrics.max_literal_length, "long string".len());
        assert_eq!(metrics.error_count, 0);
        assert!(metrics.mode_transitions >= 4);
    }

    #[test]
    fn test_errors_and_completion_are_logged() {
        let memory = crate::logging::test_memory_logger();

        let _ = test_lexer(b"ok \"unterminated\n").collect::<Vec<_>>();
        let logged = memory.get_events_with_code(codes::lexical::UNTERMINATED_STRING);
        assert!(logged.iter().any(|e| e.context.get("line") == Some(&"1".to_string())));

        let traced = LexicalPreferences {
            trace_modes: true,
            ..LexicalPreferences::builtin()
        };
        Lexer::with_preferences(b"\"traced mode\"", traced).tokenize().unwrap();
        assert!(memory.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
        assert!(memory
            .get_events()
            .iter()
            .any(|e| e.is_debug() && e.context.get("to") == Some(&"InQuotedString".to_string())));
    }
}
