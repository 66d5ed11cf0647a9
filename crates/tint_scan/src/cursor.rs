//! Byte cursor over the content of a single line.
//!
//! The cursor never sees a line terminator: the scanner hands it the line's
//! content only, so EOF is end-of-line. Reads past the end return `0x00`
//! so lookahead never needs a bounds check.

use memchr::{memchr, memchr2};

/// Cursor over a line's bytes. [`Copy`] so lookahead can snapshot it.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Byte at the current position, or `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte one position ahead of current, or `0x00` past EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Byte two positions ahead of current, or `0x00` past EOF.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.buf.get(pos).copied().unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    /// Advance by `n` bytes, clamped to EOF.
    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }

    /// Advance over one UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        self.advance_n(tint_lang::utf8_len(self.current()));
    }

    /// Jump to EOF.
    #[inline]
    pub fn advance_to_end(&mut self) {
        self.pos = self.buf.len();
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Current byte offset within the line.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Remaining bytes from the current position.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.rest().starts_with(needle)
    }

    /// Bytes from `start` to the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.buf[start..self.pos]
    }

    /// Advance while `pred` returns `true` for the current byte.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance to the next occurrence of `needle`. Returns `false` (and
    /// moves to EOF) when there is none.
    #[inline]
    pub fn skip_to(&mut self, needle: u8) -> bool {
        match memchr(needle, self.rest()) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.advance_to_end();
                false
            }
        }
    }

    /// Advance to the next occurrence of either byte. Returns `false` (and
    /// moves to EOF) when neither occurs.
    #[inline]
    pub fn skip_to_either(&mut self, a: u8, b: u8) -> bool {
        match memchr2(a, b, self.rest()) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.advance_to_end();
                false
            }
        }
    }
}
