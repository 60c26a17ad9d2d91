//! Numeric literal recognition
//!
//! Candidates at a digit, longest wins:
//! - hex `0x[0-9a-fA-F]+`
//! - octal `0o[0-7]+`
//! - float `[0-9]+\.[0-9]+`
//! - decimal `[0-9]+(KB|MB)?`

use super::cursor::Cursor;
use super::error::LexerError;
use crate::tokens::Token;
use crate::utils::Span;

const KB: i64 = 1024;
const MB: i64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberForm {
    Hex,
    Octal,
    Float,
    Decimal { multiplier: i64 },
}

/// Pick the longest numeric candidate at the cursor; returns its form and length
fn measure(cursor: &Cursor<'_>) -> (NumberForm, usize) {
    let digits = cursor.run_len(0, |b| b.is_ascii_digit());

    let suffix = match (cursor.peek_at(digits), cursor.peek_at(digits + 1)) {
        (Some(b'K'), Some(b'B')) => Some(KB),
        (Some(b'M'), Some(b'B')) => Some(MB),
        _ => None,
    };
    let mut best = match suffix {
        Some(multiplier) => (NumberForm::Decimal { multiplier }, digits + 2),
        None => (NumberForm::Decimal { multiplier: 1 }, digits),
    };

    if cursor.peek_at(digits) == Some(b'.') {
        let fraction = cursor.run_len(digits + 1, |b| b.is_ascii_digit());
        if fraction > 0 && digits + 1 + fraction > best.1 {
            best = (NumberForm::Float, digits + 1 + fraction);
        }
    }

    if cursor.peek() == Some(b'0') {
        let radix_run = match cursor.peek_at(1) {
            Some(b'x') => Some((NumberForm::Hex, cursor.run_len(2, |b| b.is_ascii_hexdigit()))),
            Some(b'o') => Some((NumberForm::Octal, cursor.run_len(2, |b| matches!(b, b'0'..=b'7')))),
            _ => None,
        };
        if let Some((form, run)) = radix_run {
            if run > 0 && 2 + run > best.1 {
                best = (form, 2 + run);
            }
        }
    }

    best
}

/// Scan a numeric literal; the cursor must be on an ASCII digit
pub(crate) fn scan_number(cursor: &mut Cursor<'_>) -> Result<Token, LexerError> {
    let start = cursor.position();
    let (form, length) = measure(cursor);
    cursor.bump_n(length);

    let span = Span::new(start, cursor.position());
    let lexeme = cursor.slice_from(start.offset);
    // Every candidate is pure ASCII
    let text = String::from_utf8_lossy(lexeme);
    let line = start.line;

    let conversion_error = || LexerError::NumberConversion {
        line,
        literal: text.to_string(),
    };

    match form {
        NumberForm::Hex => i64::from_str_radix(&text[2..], 16)
            .map(|v| Token::integer(v, span))
            .map_err(|_| conversion_error()),
        NumberForm::Octal => i64::from_str_radix(&text[2..], 8)
            .map(|v| Token::integer(v, span))
            .map_err(|_| conversion_error()),
        NumberForm::Float => match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Token::float(v, span)),
            _ => Err(conversion_error()),
        },
        NumberForm::Decimal { multiplier } => {
            let digits = if multiplier == 1 {
                &text[..]
            } else {
                &text[..text.len() - 2]
            };
            let value: i64 = digits.parse().map_err(|_| conversion_error())?;
            if value > i64::MAX / multiplier {
                return Err(LexerError::IntegerOverflow {
                    line,
                    literal: text.to_string(),
                });
            }
            Ok(Token::integer(value * multiplier, span))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn number(source: &str) -> (Result<Token, LexerError>, usize) {
        let mut cursor = Cursor::new(source.as_bytes());
        let result = scan_number(&mut cursor);
        (result, cursor.position().offset)
    }

    #[test]
    fn test_decimal_and_size_suffixes() {
        assert_eq!(number("42").0.unwrap().as_integer(), Some(42));
        assert_eq!(number("2KB").0.unwrap().as_integer(), Some(2048));
        assert_eq!(number("3MB").0.unwrap().as_integer(), Some(3 * 1048576));
        assert_eq!(number("007").0.unwrap().as_integer(), Some(7));
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(number("0x1F").0.unwrap().as_integer(), Some(31));
        assert_eq!(number("0o17").0.unwrap().as_integer(), Some(15));
        // Without radix digits only the leading zero is a number
        let (token, consumed) = number("0xZZ");
        assert_eq!(token.unwrap().as_integer(), Some(0));
        assert_eq!(consumed, 1);
        let (token, consumed) = number("0o8");
        assert_eq!(token.unwrap().as_integer(), Some(0));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_float_carries_value() {
        let token = number("3.25").0.unwrap();
        assert_eq!(token.kind(), TokenKind::Float);
        assert_eq!(token.as_float(), Some(3.25));
    }

    #[test]
    fn test_longest_match_stops_at_range_and_member_access() {
        let (token, consumed) = number("1..5");
        assert_eq!(token.unwrap().as_integer(), Some(1));
        assert_eq!(consumed, 1);

        let (token, consumed) = number("12.x");
        assert_eq!(token.unwrap().as_integer(), Some(12));
        assert_eq!(consumed, 2);

        let (_, consumed) = number("10KBx");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_overflow_boundaries() {
        let limit = i64::MAX / 1024;
        assert_eq!(
            number(&format!("{}KB", limit)).0.unwrap().as_integer(),
            Some(limit * 1024)
        );
        assert_matches!(
            number(&format!("{}KB", limit + 1)).0,
            Err(LexerError::IntegerOverflow { line: 1, ref literal }) if literal.ends_with("KB")
        );

        let limit = i64::MAX / 1048576;
        assert!(number(&format!("{}MB", limit)).0.is_ok());
        assert_matches!(
            number(&format!("{}MB", limit + 1)).0,
            Err(LexerError::IntegerOverflow { .. })
        );
    }

    #[test]
    fn test_conversion_failures() {
        assert_matches!(
            number("99999999999999999999").0,
            Err(LexerError::NumberConversion { line: 1, .. })
        );
        assert_matches!(
            number("0xFFFFFFFFFFFFFFFFFF").0,
            Err(LexerError::NumberConversion { .. })
        );
    }
}
