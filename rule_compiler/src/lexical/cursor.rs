//! Byte cursor with line tracking

use crate::utils::Position;

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.source.get(self.pos + ahead).copied()
    }

    /// Consume one byte; newlines advance the line counter
    pub(crate) fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    pub(crate) fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consume bytes while `pred` holds, returning the consumed run
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.source[start..self.pos]
    }

    /// Length of the run starting `ahead` bytes past the cursor for which `pred` holds
    pub(crate) fn run_len(&self, ahead: usize, pred: impl Fn(u8) -> bool) -> usize {
        self.source
            .get(self.pos + ahead..)
            .map(|rest| rest.iter().take_while(|&&b| pred(b)).count())
            .unwrap_or(0)
    }

    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.source[self.pos..]
    }

    pub(crate) fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.source[start..self.pos]
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn position(&self) -> Position {
        Position::new(self.pos, self.line, (self.pos - self.line_start) as u32 + 1)
    }
}

pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}
