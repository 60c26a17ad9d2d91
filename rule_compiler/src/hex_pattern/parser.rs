//! Default byte-pattern parser
//!
//! Grammar, after the surrounding braces are stripped:
//!
//! ```text
//! pattern     := sequence
//! sequence    := (byte | jump | alternation)*
//! byte        := nibble nibble          nibble := hexdigit | '?'
//! jump        := '[' n ']' | '[' n? '-' m? ']'
//! alternation := '(' sequence ('|' sequence)* ')'
//! ```
//!
//! Whitespace, `/* */` and `//` comments may appear between elements.

use super::element::{HexElement, Nibble};
use crate::config::compile_time::lexical::MAX_HEX_NESTING_DEPTH;
use super::error::HexPatternError;
use super::HexPatternParser;

/// Stock [`HexPatternParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HexParser;

impl HexPatternParser for HexParser {
    fn parse(&self, text: &[u8]) -> Result<Vec<HexElement>, HexPatternError> {
        let (body, base) = strip_braces(text);
        let mut cursor = PatternCursor::new(body, base);

        let sequence = cursor.parse_sequence(0)?;
        if let Some(first) = sequence.first().filter(|e| e.element.is_jump()) {
            return Err(HexPatternError::JumpAtBoundary {
                offset: first.offset,
            });
        }
        if let Some(last) = sequence.last().filter(|e| e.element.is_jump()) {
            return Err(HexPatternError::JumpAtBoundary {
                offset: last.offset,
            });
        }
        if sequence.is_empty() {
            return Err(HexPatternError::EmptyPattern);
        }

        Ok(sequence.into_iter().map(|e| e.element).collect())
    }
}

fn strip_braces(text: &[u8]) -> (&[u8], usize) {
    match text {
        [b'{', inner @ .., b'}'] => (inner, 1),
        _ => (text, 0),
    }
}

struct Located {
    offset: usize,
    element: HexElement,
}

struct PatternCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> PatternCursor<'a> {
    fn new(bytes: &'a [u8], base: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            base,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    /// Offset of the cursor within the full text handed to the parser
    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) -> Result<(), HexPatternError> {
        loop {
            self.skip_whitespace();
            match (self.peek(), self.peek_at(1)) {
                (Some(b'/'), Some(b'/')) => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    let start = self.offset();
                    let rest = &self.bytes[self.pos + 2..];
                    match rest.windows(2).position(|w| w == b"*/") {
                        Some(end) => self.pos += 2 + end + 2,
                        None => {
                            return Err(HexPatternError::UnexpectedCharacter {
                                byte: b'/',
                                offset: start,
                            })
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_sequence(&mut self, depth: usize) -> Result<Vec<Located>, HexPatternError> {
        let mut elements = Vec::new();

        loop {
            self.skip_trivia()?;
            let offset = self.offset();
            let element = match self.peek() {
                None => break,
                Some(b'|' | b')') if depth > 0 => break,
                Some(b'|' | b')') => {
                    return Err(HexPatternError::UnbalancedAlternation { offset })
                }
                Some(b'(') => self.parse_alternation(depth)?,
                Some(b'[') => self.parse_jump()?,
                Some(b) if Nibble::from_ascii(b).is_some() => self.parse_byte()?,
                Some(byte) => return Err(HexPatternError::UnexpectedCharacter { byte, offset }),
            };
            elements.push(Located { offset, element });
        }

        Ok(elements)
    }

    fn parse_byte(&mut self) -> Result<HexElement, HexPatternError> {
        let offset = self.offset();
        let high = self.peek().and_then(Nibble::from_ascii);
        let low = self.peek_at(1).and_then(Nibble::from_ascii);

        match (high, low) {
            (Some(high), Some(low)) => {
                self.pos += 2;
                Ok(HexElement::Byte { high, low })
            }
            _ => Err(HexPatternError::IncompleteByte { offset }),
        }
    }

    fn parse_alternation(&mut self, depth: usize) -> Result<HexElement, HexPatternError> {
        let open = self.offset();
        if depth >= MAX_HEX_NESTING_DEPTH {
            return Err(HexPatternError::NestingTooDeep { offset: open });
        }
        self.pos += 1;

        let mut alternatives = Vec::new();
        loop {
            let start = self.offset();
            let sequence = self.parse_sequence(depth + 1)?;
            let closing = self.peek();
            match closing {
                Some(b'|' | b')') => {
                    if sequence.is_empty() {
                        return Err(HexPatternError::EmptyAlternative { offset: start });
                    }
                    alternatives.push(sequence.into_iter().map(|e| e.element).collect());
                    self.pos += 1;
                    if closing == Some(b')') {
                        return Ok(HexElement::Alternation(alternatives));
                    }
                }
                _ => return Err(HexPatternError::UnbalancedAlternation { offset: open }),
            }
        }
    }

    fn parse_number(&mut self, jump_offset: usize) -> Result<Option<u32>, HexPatternError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }

        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .map(Some)
            .ok_or(HexPatternError::MalformedJump {
                offset: jump_offset,
            })
    }

    fn expect_close_bracket(&mut self, jump_offset: usize) -> Result<(), HexPatternError> {
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            Ok(())
        } else {
            Err(HexPatternError::MalformedJump {
                offset: jump_offset,
            })
        }
    }

    fn parse_jump(&mut self) -> Result<HexElement, HexPatternError> {
        let offset = self.offset();
        self.pos += 1;

        self.skip_whitespace();
        let min = self.parse_number(offset)?;
        self.skip_whitespace();

        if self.peek() != Some(b'-') {
            self.expect_close_bracket(offset)?;
            return match min {
                Some(n) => Ok(HexElement::Jump {
                    min: n,
                    max: Some(n),
                }),
                None => Err(HexPatternError::MalformedJump { offset }),
            };
        }

        self.pos += 1;
        self.skip_whitespace();
        let max = self.parse_number(offset)?;
        self.expect_close_bracket(offset)?;

        let min = min.unwrap_or(0);
        match max {
            Some(max) if max < min => Err(HexPatternError::InvertedJumpRange { min, max, offset }),
            max => Ok(HexElement::Jump { min, max }),
        }
    }
}
