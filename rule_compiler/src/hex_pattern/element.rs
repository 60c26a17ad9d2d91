//! Structured byte-pattern elements
use serde::{Deserialize, Serialize};
use std::fmt;

/// One half of a pattern byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nibble {
    /// Fixed value, always below 16
    Literal(u8),
    /// `?`
    Wildcard,
}

impl Nibble {
    pub fn from_ascii(b: u8) -> Option<Self> {
        match b {
            b'?' => Some(Self::Wildcard),
            _ => (b as char).to_digit(16).map(|v| Self::Literal(v as u8)),
        }
    }

    pub fn matches(self, value: u8) -> bool {
        match self {
            Self::Literal(v) => v == value,
            Self::Wildcard => true,
        }
    }
}

impl fmt::Display for Nibble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{:X}", v),
            Self::Wildcard => write!(f, "?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexElement {
    Byte { high: Nibble, low: Nibble },
    /// `( alt | alt ... )`, each alternative a non-empty sequence
    Alternation(Vec<Vec<HexElement>>),
    /// `[n]`, `[n-m]`, `[n-]` or `[-]`; `max: None` is unbounded
    Jump { min: u32, max: Option<u32> },
}

impl HexElement {
    /// Fully specified byte
    pub fn byte(value: u8) -> Self {
        Self::Byte {
            high: Nibble::Literal(value >> 4),
            low: Nibble::Literal(value & 0x0f),
        }
    }

    pub fn wildcard() -> Self {
        Self::Byte {
            high: Nibble::Wildcard,
            low: Nibble::Wildcard,
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Self::Jump { .. })
    }

    /// Whether a byte element accepts `value`; non-byte elements never do
    pub fn matches_byte(&self, value: u8) -> bool {
        match self {
            Self::Byte { high, low } => high.matches(value >> 4) && low.matches(value & 0x0f),
            _ => false,
        }
    }
}

fn write_sequence(f: &mut fmt::Formatter<'_>, elements: &[HexElement]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

impl fmt::Display for HexElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte { high, low } => write!(f, "{}{}", high, low),
            Self::Alternation(alternatives) => {
                write!(f, "(")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write_sequence(f, alternative)?;
                }
                write!(f, ")")
            }
            Self::Jump { min, max } => match max {
                Some(max) if max == min => write!(f, "[{}]", min),
                Some(max) => write!(f, "[{}-{}]", min, max),
                None if *min == 0 => write!(f, "[-]"),
                None => write!(f, "[{}-]", min),
            },
        }
    }
}

/// Render a whole pattern the way it would be written in rule source
pub fn render(elements: &[HexElement]) -> String {
    struct Pattern<'a>(&'a [HexElement]);

    impl fmt::Display for Pattern<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{{ ")?;
            write_sequence(f, self.0)?;
            write!(f, " }}")
        }
    }

    Pattern(elements).to_string()
}
