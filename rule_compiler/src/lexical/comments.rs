//! Block and line comments

use super::analyzer::{Lexer, Mode};
use super::error::LexerError;
use crate::hex_pattern::HexPatternParser;
use crate::tokens::Token;
use crate::utils::Position;

impl<H: HexPatternParser> Lexer<'_, H> {
    pub(super) fn open_block_comment(&mut self, start: Position) {
        self.cursor.bump_n(2);
        self.open_delimiter = start;
        self.metrics.comment_count += 1;
        self.enter_mode(Mode::InBlockComment);
    }

    /// Skip to the end of the line; the newline itself is left as whitespace
    pub(super) fn skip_line_comment(&mut self) {
        self.cursor.eat_while(|b| b != b'\n');
        self.metrics.comment_count += 1;
    }

    pub(super) fn scan_block_comment(&mut self) -> Result<Option<Token>, LexerError> {
        match (self.cursor.peek(), self.cursor.peek_at(1)) {
            (None, _) => Err(self.end_of_input_error(LexerError::UnterminatedComment {
                line: self.open_delimiter.line,
            })),
            (Some(b'*'), Some(b'/')) => {
                self.cursor.bump_n(2);
                self.enter_mode(Mode::Initial);
                Ok(None)
            }
            (Some(_), _) => {
                self.cursor.bump();
                self.cursor.eat_while(|b| b != b'*');
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexical::{test_lexer, LexerError, Mode};
    use crate::tokens::{Token, TokenKind};
    use assert_matches::assert_matches;

    #[test]
    fn test_comments_are_discarded() {
        let tokens: Vec<Token> = test_lexer(b"a /* x\n\xff ** / */ b // c \xfe\nd /**/e")
            .map(Result::unwrap)
            .collect();
        let texts: Vec<&[u8]> = tokens.iter().filter_map(Token::as_text).collect();
        assert_eq!(texts, vec![&b"a"[..], b"b", b"d", b"e"]);
        assert_eq!(tokens[1].line(), 2);
        assert_eq!(tokens[2].line(), 3);
    }

    #[test]
    fn test_block_comment_mode() {
        let mut lexer = test_lexer(b"/* a\n*/x");
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!(token.line(), 2);
        assert_eq!(lexer.mode(), Mode::Initial);
        assert_eq!(lexer.metrics().comment_count, 1);
    }

    #[test]
    fn test_comment_does_not_nest() {
        let kinds: Vec<TokenKind> = test_lexer(b"/* /* */ */ a/")
            .map(|r| r.unwrap().kind())
            .collect();
        assert_eq!(kinds, vec![TokenKind::Symbol(b'*'), TokenKind::Regex, TokenKind::Eof]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut lexer = test_lexer(b"x\n/* never\nclosed *");
        lexer.next_token().unwrap();
        assert_matches!(lexer.next_token(), Err(LexerError::UnterminatedComment { line: 2 }));
        assert_eq!(lexer.mode(), Mode::Initial);
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let tokens: Vec<Token> = test_lexer(b"a // trailing").map(Result::unwrap).collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is_eof());
    }
}
