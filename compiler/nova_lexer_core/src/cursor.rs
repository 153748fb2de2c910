//! Copyable cursor over a sentinel-terminated buffer.
//!
//! The cursor reads byte-by-byte; end of input is the sentinel (`0x00`) at
//! or past the source length. Interior null bytes in the content are told
//! apart from the sentinel by position, so the scanner never mistakes them
//! for EOF.
//!
//! `Cursor` is [`Copy`]: a saved cursor is a checkpoint, which is how the
//! scanner performs its one bounded rewind (rejecting a tentative numeric
//! type suffix).

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`; guaranteed
/// by `SourceBuffer` construction. This is what makes `peek`/`peek2` safe
/// without bounds checks near the end.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position.
    pos: u32,
    /// Length of the source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` and everything after it must be `0x00`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!((source_len as usize) < buf.len());
        debug_assert_eq!(buf[source_len as usize], 0);
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// The byte at the current position; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// The byte one ahead of current. Safe at any position thanks to the
    /// zero padding.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// The byte two ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Advance by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Check if the cursor is at end of input: current byte is the
    /// sentinel *and* the position is at or past the source length.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Number of source bytes left from the current position.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.source_len.saturating_sub(self.pos)
    }

    /// Extract a source substring.
    ///
    /// # Contract
    ///
    /// `start..end` must lie within the source content on UTF-8 character
    /// boundaries, which holds for all token boundaries the scanner
    /// produces (the source was a valid `&str`).
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on a buffer copied from a valid &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end && end <= self.source_len);
        // SAFETY: the buffer is a copy of valid UTF-8 and the scanner only
        // produces boundaries on character edges.
        unsafe { std::str::from_utf8_unchecked(&self.buf[start as usize..end as usize]) }
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Extract raw source bytes, with no character-boundary requirement.
    ///
    /// Used for operator probing, where a candidate may end mid-character;
    /// such candidates simply fail the classifier's exact match.
    pub fn byte_slice(&self, start: u32, end: u32) -> &'a [u8] {
        debug_assert!(start <= end && end <= self.source_len);
        &self.buf[start as usize..end as usize]
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be `false` (true for every byte-class predicate the
    /// scanner uses), so the sentinel terminates the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Width in bytes of the UTF-8 character whose leading byte is `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character (1-4 bytes).
    #[inline]
    pub fn advance_char(&mut self) {
        self.advance_n(Self::utf8_char_width(self.current()));
    }

    /// Advance to the next `\n` or to EOF, whichever comes first.
    ///
    /// memchr-accelerated; used to skip line-comment bodies. The newline
    /// itself is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset is bounded by source_len which fits in u32"
    )]
    pub fn skip_to_line_end(&mut self) {
        let rest = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr(b'\n', rest) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance past ordinary string content to the next `"`, `\`, or `\n`,
    /// returning the byte found (`0` for EOF).
    ///
    /// Newlines are interesting to the caller only for line counting -
    /// Nova strings may span lines.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset is bounded by source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let rest = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr3(b'"', b'\\', b'\n', rest) {
            Some(offset) => {
                self.pos += offset as u32;
                self.buf[self.pos as usize]
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }
}
