//! Byte-pattern errors
use crate::config::compile_time::lexical::MAX_HEX_NESTING_DEPTH;
use thiserror::Error;

/// Offsets are byte positions within the text handed to the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexPatternError {
    #[error("byte pattern contains no elements")]
    EmptyPattern,

    #[error("incomplete byte at offset {offset}: a byte needs two nibbles")]
    IncompleteByte { offset: usize },

    #[error("unexpected character '{}' at offset {offset}", .byte.escape_ascii())]
    UnexpectedCharacter { byte: u8, offset: usize },

    #[error("unbalanced alternation at offset {offset}")]
    UnbalancedAlternation { offset: usize },

    #[error("empty alternative at offset {offset}")]
    EmptyAlternative { offset: usize },

    #[error("malformed jump at offset {offset}")]
    MalformedJump { offset: usize },

    #[error("inverted jump range [{min}-{max}] at offset {offset}")]
    InvertedJumpRange { min: u32, max: u32, offset: usize },

    #[error("jump at offset {offset} cannot start or end a pattern")]
    JumpAtBoundary { offset: usize },

    #[error("alternation at offset {offset} nested deeper than {} levels", MAX_HEX_NESTING_DEPTH)]
    NestingTooDeep { offset: usize },
}

impl HexPatternError {
    /// Offset of the offending text, if the error points at one
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::EmptyPattern => None,
            Self::IncompleteByte { offset }
            | Self::UnexpectedCharacter { offset, .. }
            | Self::UnbalancedAlternation { offset }
            | Self::EmptyAlternative { offset }
            | Self::MalformedJump { offset }
            | Self::InvertedJumpRange { offset, .. }
            | Self::JumpAtBoundary { offset }
            | Self::NestingTooDeep { offset } => Some(*offset),
        }
    }
}
