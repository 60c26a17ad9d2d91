//! Reserved words of the rule language
//!
//! Keywords are matched on whole words only: the classifier hands over a
//! complete identifier-shaped run, so `rules` or `and_x` never reach
//! `Keyword::from_str` as a keyword.
use serde::{Deserialize, Serialize};

/// Reserved keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    // === RULE STRUCTURE ===
    Private,
    Global,
    Rule,
    Meta,
    Strings,
    Condition,
    Import,
    Include,

    // === STRING MODIFIERS ===
    Ascii,
    Base64,
    Wide,
    Xor,
    Fullword,
    Nocase,

    // === BOOLEAN LITERALS ===
    True,
    False,

    // === CONDITION OPERATORS ===
    Not,
    And,
    Or,
    At,
    In,
    Of,
    Matches,
    Contains,

    // === QUANTIFIERS ===
    Them,
    For,
    All,
    Any,

    // === BUILT-IN VALUES ===
    Entrypoint,
    Filesize,
}

impl Keyword {
    /// Every keyword, in declaration order
    pub const ALL: [Keyword; 30] = [
        Self::Private,
        Self::Global,
        Self::Rule,
        Self::Meta,
        Self::Strings,
        Self::Condition,
        Self::Import,
        Self::Include,
        Self::Ascii,
        Self::Base64,
        Self::Wide,
        Self::Xor,
        Self::Fullword,
        Self::Nocase,
        Self::True,
        Self::False,
        Self::Not,
        Self::And,
        Self::Or,
        Self::At,
        Self::In,
        Self::Of,
        Self::Matches,
        Self::Contains,
        Self::Them,
        Self::For,
        Self::All,
        Self::Any,
        Self::Entrypoint,
        Self::Filesize,
    ];

    /// Get the exact spelling as it appears in rule source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Global => "global",
            Self::Rule => "rule",
            Self::Meta => "meta",
            Self::Strings => "strings",
            Self::Condition => "condition",
            Self::Import => "import",
            Self::Include => "include",

            Self::Ascii => "ascii",
            Self::Base64 => "base64",
            Self::Wide => "wide",
            Self::Xor => "xor",
            Self::Fullword => "fullword",
            Self::Nocase => "nocase",

            Self::True => "true",
            Self::False => "false",

            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::At => "at",
            Self::In => "in",
            Self::Of => "of",
            Self::Matches => "matches",
            Self::Contains => "contains",

            Self::Them => "them",
            Self::For => "for",
            Self::All => "all",
            Self::Any => "any",

            Self::Entrypoint => "entrypoint",
            Self::Filesize => "filesize",
        }
    }

    /// Parse keyword from a complete word with exact case matching
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == s)
    }

    /// Parse keyword from raw source bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().and_then(Self::from_str)
    }

    /// String modifiers that may follow a string definition
    pub const fn is_string_modifier(self) -> bool {
        matches!(
            self,
            Self::Ascii | Self::Base64 | Self::Wide | Self::Xor | Self::Fullword | Self::Nocase
        )
    }

    /// Keywords that start or qualify a rule declaration
    pub const fn is_rule_qualifier(self) -> bool {
        matches!(self, Self::Private | Self::Global | Self::Rule)
    }

    pub const fn is_boolean_literal(self) -> bool {
        matches!(self, Self::True | Self::False)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check if a word is reserved
pub fn is_reserved_keyword(s: &str) -> bool {
    Keyword::from_str(s).is_some()
}

/// Sized-read function names: `u?int(8|16|32)(be)?`, whole word only
pub fn is_integer_function(word: &[u8]) -> bool {
    let rest = word.strip_prefix(b"u").unwrap_or(word);
    let Some(rest) = rest.strip_prefix(b"int") else {
        return false;
    };
    let rest = match rest {
        [b'8', tail @ ..] => tail,
        [b'1', b'6', tail @ ..] | [b'3', b'2', tail @ ..] => tail,
        _ => return false,
    };
    rest.is_empty() || rest == b"be"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_for_every_keyword() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
            assert!(is_reserved_keyword(keyword.as_str()));
        }
    }

    #[test]
    fn test_case_and_prefix_sensitivity() {
        assert_eq!(Keyword::from_str("Rule"), None);
        assert_eq!(Keyword::from_str("rules"), None);
        assert_eq!(Keyword::from_str("an"), None);
        assert_eq!(Keyword::from_bytes(b"filesize"), Some(Keyword::Filesize));
        assert_eq!(Keyword::from_bytes(&[0xff, 0xfe]), None);
    }

    #[test]
    fn test_classification_helpers() {
        assert!(Keyword::Nocase.is_string_modifier());
        assert!(!Keyword::Condition.is_string_modifier());
        assert!(Keyword::Private.is_rule_qualifier());
        assert!(Keyword::False.is_boolean_literal());
    }

    #[test]
    fn test_integer_function_names() {
        for name in [
            "int8", "int16", "int32", "uint8", "uint16", "uint32", "int8be", "int16be",
            "int32be", "uint8be", "uint16be", "uint32be",
        ] {
            assert!(is_integer_function(name.as_bytes()), "{name}");
        }
        for name in ["int", "int64", "uint", "int16le", "uuint8", "int8bee", "xint8", "int1"] {
            assert!(!is_integer_function(name.as_bytes()), "{name}");
        }
    }
}
