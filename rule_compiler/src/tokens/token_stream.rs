//! Collected token stream with lookahead for the parser

use crate::{tokens::token::*, utils::Span};
use thiserror::Error;

/// Token stream produced by [`crate::lexical::tokenize`]; ends with `Eof`
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        crate::log_debug!("Token stream created",
            "total_tokens" => tokens.len(),
            "eof_found" => tokens.last().is_some_and(Token::is_eof)
        );

        Self {
            tokens,
            position: 0,
        }
    }

    // === CORE NAVIGATION ===

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(Token::kind)
    }

    pub fn current_span(&self) -> Option<Span> {
        self.current().map(Token::span)
    }

    /// Peek at the next token without advancing
    pub fn peek(&self) -> Option<&Token> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n positions
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Advance to the next token
    pub fn advance(&mut self) -> Option<&Token> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    // === SPANS ===

    pub fn span_at_position(&self, position: usize) -> Option<Span> {
        self.tokens.get(position).map(Token::span)
    }

    /// Span covering a range of token positions
    pub fn span_range(&self, start_pos: usize, end_pos: usize) -> Option<Span> {
        match (self.span_at_position(start_pos), self.span_at_position(end_pos)) {
            (Some(start), Some(end)) => Some(start.to(end)),
            (start, end) => start.or(end),
        }
    }

    // === PARSER INTEGRATION ===

    pub fn check_kind(&self, expected: TokenKind) -> bool {
        self.current_kind() == Some(expected)
    }

    /// Consume the current token if it matches predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        let token = self.current().filter(|t| predicate(t)).cloned()?;
        self.advance();
        Some(token)
    }

    /// Advance if current token has the expected kind
    pub fn advance_if_matches(&mut self, expected: TokenKind) -> bool {
        self.consume_if(|t| t.kind() == expected).is_some()
    }

    /// Expect a specific kind, reporting what was found instead
    pub fn expect_kind(&mut self, expected: TokenKind) -> Result<Token, TokenStreamError> {
        match self.current() {
            Some(current) if current.kind() == expected => {
                let result = current.clone();
                self.advance();
                Ok(result)
            }
            Some(current) => Err(TokenStreamError::UnexpectedToken {
                expected,
                found: current.as_source_string(),
                line: current.line(),
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream { expected }),
        }
    }

    // === CHECKPOINTS ===

    /// Save current position as checkpoint for backtracking
    pub fn save_position(&self) -> usize {
        self.position
    }

    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.tokens.len());
    }

    // === ITERATION ===

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn remaining_tokens(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    pub fn diagnostic(&self) -> String {
        let current_info = match self.current() {
            Some(current) => format!("'{}' at {}", current, current.span()),
            None => "<EOF>".to_string(),
        };

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.tokens.len(),
            current_info
        )
    }

    pub fn has_eof(&self) -> bool {
        self.tokens.last().is_some_and(Token::is_eof)
    }

    /// Spans must be monotonically increasing
    pub fn validate_span_order(&self) -> Result<(), String> {
        for window in self.tokens.windows(2) {
            let current = window[0].span();
            let next = window[1].span();

            if current.end.offset > next.start.offset {
                return Err(format!(
                    "Span order violation: token ending at {} overlaps next token at {}",
                    current.end.offset, next.start.offset
                ));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenStreamError {
    #[error("Expected {expected:?}, found '{found}' on line {line}")]
    UnexpectedToken {
        expected: TokenKind,
        found: String,
        line: u32,
    },

    #[error("Expected {expected:?}, but reached end of input")]
    UnexpectedEndOfStream { expected: TokenKind },
}
