//! Lexical analysis
//!
//! [`Lexer`] turns rule source bytes into [`Token`]s on demand. The free
//! functions here cover the common whole-input case.
//!
//! [`Token`]: crate::tokens::Token

pub mod analyzer;
mod classifier;
mod comments;
mod cursor;
pub mod error;
mod hex;
mod numbers;
mod regex;
mod strings;

use crate::config::compile_time::lexical::{MAX_IDENTIFIER_LENGTH, MAX_LITERAL_SIZE};
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;

pub use analyzer::{Lexer, LexicalMetrics, Mode};
pub use error::{LexErrorKind, LexerError};

/// Tokenize a complete source unit; stops at the first error
pub fn tokenize(source: &[u8]) -> Result<TokenStream, LexerError> {
    Lexer::new(source).tokenize()
}

pub fn tokenize_with_preferences(
    source: &[u8],
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    Lexer::with_preferences(source, preferences).tokenize()
}

pub fn create_lexer(source: &[u8]) -> Lexer<'_> {
    Lexer::new(source)
}

#[cfg(test)]
pub(crate) fn test_lexer(source: &[u8]) -> Lexer<'_> {
    Lexer::with_preferences(source, LexicalPreferences::builtin())
}

/// Check that every lexical error code is registered with metadata
pub fn validate_lexical_codes() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::NON_ASCII_BYTE,
        codes::lexical::UNTERMINATED_STRING,
        codes::lexical::NUMBER_CONVERSION,
        codes::lexical::IDENTIFIER_TOO_LONG,
        codes::lexical::LITERAL_TOO_LONG,
        codes::lexical::INTEGER_OVERFLOW,
        codes::lexical::ILLEGAL_ESCAPE_SEQUENCE,
        codes::lexical::UNTERMINATED_REGEX,
        codes::lexical::INVALID_REGEX_MODIFIER,
        codes::lexical::UNTERMINATED_COMMENT,
        codes::lexical::INVALID_HEX_PATTERN,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits",
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_literal_size" => MAX_LITERAL_SIZE
    );

    Ok(())
}
