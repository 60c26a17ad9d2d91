//! Byte-pattern sub-language
//!
//! The lexer only decides where a `{ ... }` pattern starts and ends. The
//! contents are handed to a [`HexPatternParser`], which owns the grammar of
//! bytes, wildcards, jumps and alternations. [`HexParser`] is the stock
//! implementation; any closure with the right signature works as well.

pub mod element;
pub mod error;
pub mod parser;

pub use element::{HexElement, Nibble};
pub use error::HexPatternError;
pub use parser::HexParser;

/// Service that turns the exact text of a byte pattern (braces included)
/// into structured elements.
pub trait HexPatternParser {
    fn parse(&self, text: &[u8]) -> Result<Vec<HexElement>, HexPatternError>;
}

impl<F> HexPatternParser for F
where
    F: Fn(&[u8]) -> Result<Vec<HexElement>, HexPatternError>,
{
    fn parse(&self, text: &[u8]) -> Result<Vec<HexElement>, HexPatternError> {
        self(text)
    }
}
