//! Token model and collected token streams
//!
//! The lexer emits one [`Token`] per lexeme. Each token knows its
//! [`TokenKind`], the line its lexeme started on, a [`TokenValue`] payload
//! and a [`Span`](crate::utils::Span). [`TokenStream`] collects a full
//! sequence (terminated by `Eof`) and gives the parser lookahead and
//! checkpoints.

pub mod token;
pub mod token_stream;

pub use token::{classify_operator, RegexModifiers, Token, TokenClass, TokenKind, TokenValue};
pub use token_stream::{TokenStream, TokenStreamError};
