//! Lexical errors
//!
//! Every error names the line on which the offending lexeme began and maps
//! to a stable logging code.

use crate::config::compile_time::lexical::{MAX_IDENTIFIER_LENGTH, MAX_LITERAL_SIZE};
use crate::hex_pattern::HexPatternError;
use crate::logging::{codes, Code};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexerError {
    #[error("line {line}: cannot convert numeric literal '{literal}'")]
    NumberConversion { line: u32, literal: String },

    #[error("line {line}: integer literal '{literal}' overflows a 64-bit integer")]
    IntegerOverflow { line: u32, literal: String },

    #[error("line {line}: invalid regular expression modifier '{}'", .modifier.escape_ascii())]
    InvalidRegexModifier { line: u32, modifier: u8 },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: u32 },

    #[error("line {line}: illegal escape sequence '\\{}'", .escape.escape_ascii())]
    IllegalEscapeSequence { line: u32, escape: u8 },

    #[error("line {line}: unterminated regular expression")]
    UnterminatedRegex { line: u32 },

    #[error("line {line}: non-ASCII byte 0x{byte:02x}")]
    NonAsciiByte { line: u32, byte: u8 },

    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: u32 },

    #[error("line {line}: identifier too long: {length} characters (max {})", MAX_IDENTIFIER_LENGTH)]
    IdentifierTooLong { line: u32, length: usize },

    #[error("line {line}: literal too long: {length} bytes (max {})", MAX_LITERAL_SIZE)]
    LiteralTooLong { line: u32, length: usize },

    #[error("line {line}: invalid byte pattern: {error}")]
    HexPattern {
        line: u32,
        #[source]
        error: HexPatternError,
    },
}

/// Field-less discriminant of [`LexerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    NumberConversion,
    IntegerOverflow,
    InvalidRegexModifier,
    UnterminatedString,
    IllegalEscapeSequence,
    UnterminatedRegex,
    NonAsciiByte,
    UnterminatedComment,
    IdentifierTooLong,
    LiteralTooLong,
    HexPattern,
}

impl LexerError {
    pub fn kind(&self) -> LexErrorKind {
        match self {
            Self::NumberConversion { .. } => LexErrorKind::NumberConversion,
            Self::IntegerOverflow { .. } => LexErrorKind::IntegerOverflow,
            Self::InvalidRegexModifier { .. } => LexErrorKind::InvalidRegexModifier,
            Self::UnterminatedString { .. } => LexErrorKind::UnterminatedString,
            Self::IllegalEscapeSequence { .. } => LexErrorKind::IllegalEscapeSequence,
            Self::UnterminatedRegex { .. } => LexErrorKind::UnterminatedRegex,
            Self::NonAsciiByte { .. } => LexErrorKind::NonAsciiByte,
            Self::UnterminatedComment { .. } => LexErrorKind::UnterminatedComment,
            Self::IdentifierTooLong { .. } => LexErrorKind::IdentifierTooLong,
            Self::LiteralTooLong { .. } => LexErrorKind::LiteralTooLong,
            Self::HexPattern { .. } => LexErrorKind::HexPattern,
        }
    }

    /// Line on which the offending lexeme began
    pub fn line(&self) -> u32 {
        match self {
            Self::NumberConversion { line, .. }
            | Self::IntegerOverflow { line, .. }
            | Self::InvalidRegexModifier { line, .. }
            | Self::UnterminatedString { line }
            | Self::IllegalEscapeSequence { line, .. }
            | Self::UnterminatedRegex { line }
            | Self::NonAsciiByte { line, .. }
            | Self::UnterminatedComment { line }
            | Self::IdentifierTooLong { line, .. }
            | Self::LiteralTooLong { line, .. }
            | Self::HexPattern { line, .. } => *line,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn error_code(&self) -> Code {
        match self.kind() {
            LexErrorKind::NumberConversion => codes::lexical::NUMBER_CONVERSION,
            LexErrorKind::IntegerOverflow => codes::lexical::INTEGER_OVERFLOW,
            LexErrorKind::InvalidRegexModifier => codes::lexical::INVALID_REGEX_MODIFIER,
            LexErrorKind::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
            LexErrorKind::IllegalEscapeSequence => codes::lexical::ILLEGAL_ESCAPE_SEQUENCE,
            LexErrorKind::UnterminatedRegex => codes::lexical::UNTERMINATED_REGEX,
            LexErrorKind::NonAsciiByte => codes::lexical::NON_ASCII_BYTE,
            LexErrorKind::UnterminatedComment => codes::lexical::UNTERMINATED_COMMENT,
            LexErrorKind::IdentifierTooLong => codes::lexical::IDENTIFIER_TOO_LONG,
            LexErrorKind::LiteralTooLong => codes::lexical::LITERAL_TOO_LONG,
            LexErrorKind::HexPattern => codes::lexical::INVALID_HEX_PATTERN,
        }
    }
}
