//! Byte cursor for the text scanner.

/// Cursor over the bytes of a `&str`.
///
/// Reads past the end return `0x00`, which no scanning predicate accepts.
#[derive(Clone, Copy, Debug)]
pub(super) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Cursor {
            buf: text.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.buf.get(pos).copied().unwrap_or(0)
    }

    #[inline]
    pub(super) fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    #[inline]
    pub(super) fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    pub(super) fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    pub(super) fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub(super) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub(super) fn advance_char(&mut self) {
        let width = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        self.advance_n(width);
    }

    #[inline]
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    #[inline]
    pub(super) fn pos(&self) -> usize {
        self.pos
    }

    /// Advance while `pred` holds for the current byte. Stops at EOF.
    #[inline]
    pub(super) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance_char();
        }
    }

    /// Advance past the next occurrence of `first` `second`, or to EOF.
    pub(super) fn eat_until_pair(&mut self, first: u8, second: u8) {
        while !self.is_eof() {
            if self.current() == first && self.peek() == second {
                self.advance_n(2);
                return;
            }
            self.advance_char();
        }
    }
}
