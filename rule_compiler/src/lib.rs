//! Lexical front end for the detection rule language
//!
//! Rule source bytes go in, classified [`tokens::Token`]s come out. Byte
//! patterns (`{ 4D 5A ?? }`) are delimited here and handed to a
//! [`hex_pattern::HexPatternParser`] service for their internal syntax.

pub mod config;
pub mod grammar;
pub mod hex_pattern;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, Lexer, LexerError};
pub use tokens::{Token, TokenKind, TokenStream, TokenValue};
