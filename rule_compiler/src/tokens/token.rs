//! Token model produced by the lexer
//!
//! Every token carries its kind, the line on which its lexeme began, a
//! payload whose variant always agrees with the kind, and the source span.
//! Construction goes through the constructors below so that agreement holds.
use crate::grammar::keywords::Keyword;
use crate::hex_pattern::{element, HexElement};
use crate::utils::Span;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Trailing regex modifiers; order is irrelevant and repeats are allowed
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RegexModifiers: u8 {
        /// `i`
        const CASE_INSENSITIVE = 1 << 0;
        /// `s`
        const DOT_MATCHES_NEWLINE = 1 << 1;
    }
}

impl RegexModifiers {
    /// Map a single modifier character
    pub fn from_char(c: u8) -> Option<Self> {
        match c {
            b'i' => Some(Self::CASE_INSENSITIVE),
            b's' => Some(Self::DOT_MATCHES_NEWLINE),
            _ => None,
        }
    }
}

impl fmt::Display for RegexModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::CASE_INSENSITIVE) {
            write!(f, "i")?;
        }
        if self.contains(Self::DOT_MATCHES_NEWLINE) {
            write!(f, "s")?;
        }
        Ok(())
    }
}

/// Token categories recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword(Keyword),

    // Two-character operators
    DotDot, // ..
    Le,     // <=
    Ge,     // >=
    Eq,     // ==
    Ne,     // !=
    Shl,    // <<
    Shr,    // >>

    // Sigil identifiers; the payload is the full lexeme including the sigil
    StringIdentifier,             // $name
    StringIdentifierWithWildcard, // $name*
    StringCount,                  // #name
    StringOffset,                 // @name
    StringLength,                 // !name

    /// `u?int(8|16|32)(be)?`
    IntegerFunction,
    Identifier,

    // Literals
    Integer,
    Float,
    TextString,
    Regex,
    HexString,

    /// Any other printable ASCII character
    Symbol(u8),
    Eof,
}

/// Coarse grouping used for metrics and parser dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenClass {
    Keyword,
    Operator,
    Identifier,
    Literal,
    Punctuation,
    End,
}

impl TokenKind {
    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Keyword(_) => TokenClass::Keyword,
            Self::DotDot | Self::Le | Self::Ge | Self::Eq | Self::Ne | Self::Shl | Self::Shr => {
                TokenClass::Operator
            }
            Self::StringIdentifier
            | Self::StringIdentifierWithWildcard
            | Self::StringCount
            | Self::StringOffset
            | Self::StringLength
            | Self::IntegerFunction
            | Self::Identifier => TokenClass::Identifier,
            Self::Integer | Self::Float | Self::TextString | Self::Regex | Self::HexString => {
                TokenClass::Literal
            }
            Self::Symbol(_) => TokenClass::Punctuation,
            Self::Eof => TokenClass::End,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.token_class() == TokenClass::Operator
    }

    /// Kinds whose payload is the lexeme text
    pub fn carries_text(&self) -> bool {
        matches!(self, Self::TextString) || self.token_class() == TokenClass::Identifier
    }

    /// Source spelling of an operator kind
    pub fn operator_str(&self) -> Option<&'static str> {
        match self {
            Self::DotDot => Some(".."),
            Self::Le => Some("<="),
            Self::Ge => Some(">="),
            Self::Eq => Some("=="),
            Self::Ne => Some("!="),
            Self::Shl => Some("<<"),
            Self::Shr => Some(">>"),
            _ => None,
        }
    }
}

/// Two-character operator starting with `first` and followed by `second`
pub fn classify_operator(first: u8, second: u8) -> Option<TokenKind> {
    match (first, second) {
        (b'.', b'.') => Some(TokenKind::DotDot),
        (b'<', b'=') => Some(TokenKind::Le),
        (b'>', b'=') => Some(TokenKind::Ge),
        (b'=', b'=') => Some(TokenKind::Eq),
        (b'!', b'=') => Some(TokenKind::Ne),
        (b'<', b'<') => Some(TokenKind::Shl),
        (b'>', b'>') => Some(TokenKind::Shr),
        _ => None,
    }
}

/// Token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenValue {
    None,
    /// Raw bytes: identifier lexemes and unescaped string contents
    Text(Vec<u8>),
    Integer(i64),
    Float(f64),
    Regex {
        pattern: Vec<u8>,
        modifiers: RegexModifiers,
    },
    HexPattern(Vec<HexElement>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    line: u32,
    value: TokenValue,
    span: Span,
}

impl Token {
    fn new(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Self {
            kind,
            line: span.start.line,
            value,
            span,
        }
    }

    pub fn keyword(keyword: Keyword, span: Span) -> Self {
        Self::new(TokenKind::Keyword(keyword), TokenValue::None, span)
    }

    pub fn operator(kind: TokenKind, span: Span) -> Self {
        debug_assert!(kind.is_operator(), "{:?} is not an operator", kind);
        Self::new(kind, TokenValue::None, span)
    }

    pub fn symbol(byte: u8, span: Span) -> Self {
        Self::new(TokenKind::Symbol(byte), TokenValue::None, span)
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, TokenValue::None, span)
    }

    /// Identifier-class token (generic, sigil or sized-read name)
    pub fn identifier(kind: TokenKind, lexeme: &[u8], span: Span) -> Self {
        debug_assert!(
            kind.token_class() == TokenClass::Identifier,
            "{:?} is not an identifier kind",
            kind
        );
        Self::new(kind, TokenValue::Text(lexeme.to_vec()), span)
    }

    pub fn integer(value: i64, span: Span) -> Self {
        Self::new(TokenKind::Integer, TokenValue::Integer(value), span)
    }

    pub fn float(value: f64, span: Span) -> Self {
        Self::new(TokenKind::Float, TokenValue::Float(value), span)
    }

    /// Quoted string; `content` is the raw text between the quotes
    pub fn text_string(content: Vec<u8>, span: Span) -> Self {
        Self::new(TokenKind::TextString, TokenValue::Text(content), span)
    }

    pub fn regex(pattern: Vec<u8>, modifiers: RegexModifiers, span: Span) -> Self {
        Self::new(
            TokenKind::Regex,
            TokenValue::Regex { pattern, modifiers },
            span,
        )
    }

    pub fn hex_string(elements: Vec<HexElement>, span: Span) -> Self {
        Self::new(TokenKind::HexString, TokenValue::HexPattern(elements), span)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// 1-based line on which the lexeme began
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn token_class(&self) -> TokenClass {
        self.kind.token_class()
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&[u8]> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            TokenValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_regex(&self) -> Option<(&[u8], RegexModifiers)> {
        match &self.value {
            TokenValue::Regex { pattern, modifiers } => Some((pattern, *modifiers)),
            _ => None,
        }
    }

    pub fn as_hex_pattern(&self) -> Option<&[HexElement]> {
        match &self.value {
            TokenValue::HexPattern(elements) => Some(elements),
            _ => None,
        }
    }

    /// Render the token roughly as it appeared in rule source
    pub fn as_source_string(&self) -> String {
        match (&self.kind, &self.value) {
            (TokenKind::Keyword(kw), _) => kw.as_str().to_string(),
            (TokenKind::Symbol(b), _) => (*b as char).to_string(),
            (TokenKind::Eof, _) => "<EOF>".to_string(),
            (kind, _) if kind.is_operator() => kind.operator_str().unwrap_or_default().to_string(),
            (TokenKind::TextString, TokenValue::Text(text)) => {
                format!("\"{}\"", String::from_utf8_lossy(text))
            }
            (_, TokenValue::Text(text)) => String::from_utf8_lossy(text).into_owned(),
            (_, TokenValue::Integer(v)) => v.to_string(),
            (_, TokenValue::Float(v)) => v.to_string(),
            (_, TokenValue::Regex { pattern, modifiers }) => {
                format!("/{}/{}", String::from_utf8_lossy(pattern), modifiers)
            }
            (_, TokenValue::HexPattern(elements)) => element::render(elements),
            (kind, TokenValue::None) => format!("{:?}", kind),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_source_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn span_on(line: u32) -> Span {
        let start = Position::new(0, line, 1);
        Span::new(start, start)
    }

    #[test]
    fn test_line_comes_from_span_start() {
        let token = Token::integer(42, span_on(7));
        assert_eq!(token.line(), 7);
        assert_eq!(token.kind(), TokenKind::Integer);
        assert_eq!(token.as_integer(), Some(42));
        assert_eq!(token.as_text(), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(TokenKind::Keyword(Keyword::Rule).token_class(), TokenClass::Keyword);
        assert_eq!(TokenKind::Shr.token_class(), TokenClass::Operator);
        assert_eq!(TokenKind::StringCount.token_class(), TokenClass::Identifier);
        assert_eq!(TokenKind::HexString.token_class(), TokenClass::Literal);
        assert_eq!(TokenKind::Symbol(b'{').token_class(), TokenClass::Punctuation);
        assert!(TokenKind::TextString.carries_text());
        assert!(!TokenKind::Regex.carries_text());
    }

    #[test]
    fn test_operator_classification() {
        assert_eq!(classify_operator(b'!', b'='), Some(TokenKind::Ne));
        assert_eq!(classify_operator(b'<', b'<'), Some(TokenKind::Shl));
        assert_eq!(classify_operator(b'=', b'>'), None);
        assert_eq!(TokenKind::DotDot.operator_str(), Some(".."));
    }

    #[test]
    fn test_regex_modifiers() {
        let both = RegexModifiers::from_char(b's').unwrap() | RegexModifiers::CASE_INSENSITIVE;
        assert_eq!(both.to_string(), "is");
        assert_eq!(RegexModifiers::from_char(b'x'), None);

        let token = Token::regex(b"ab+c".to_vec(), both, span_on(1));
        assert_eq!(token.to_string(), "/ab+c/is");
        assert_eq!(token.as_regex(), Some((&b"ab+c"[..], both)));
    }

    #[test]
    fn test_source_rendering() {
        assert_eq!(Token::keyword(Keyword::Condition, span_on(1)).to_string(), "condition");
        assert_eq!(Token::operator(TokenKind::Ge, span_on(1)).to_string(), ">=");
        assert_eq!(Token::symbol(b'(', span_on(1)).to_string(), "(");
        assert_eq!(Token::text_string(b"a\\n".to_vec(), span_on(1)).to_string(), "\"a\\n\"");
        assert_eq!(
            Token::identifier(TokenKind::StringIdentifierWithWildcard, b"$a*", span_on(1)).to_string(),
            "$a*"
        );
        assert_eq!(
            Token::hex_string(vec![HexElement::byte(0x4d)], span_on(1)).to_string(),
            "{ 4D }"
        );
        assert_eq!(Token::eof(span_on(1)).to_string(), "<EOF>");
    }
}
