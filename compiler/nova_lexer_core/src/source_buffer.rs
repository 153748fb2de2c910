//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees a `0x00` byte after the source content, so the
//! scanner detects end of input by reading the sentinel instead of checking
//! bounds on every byte. The total size is rounded up to the next 64-byte
//! boundary; the zero padding makes `peek()`/`peek2()` safe at the very end
//! of the source.

use crate::Cursor;

/// Padding granularity; also provides the read-ahead slack for `peek2`.
const PAD_BOUNDARY: usize = 64;

/// An immutable source buffer with a `0x00` sentinel after the content.
///
/// # Layout
///
/// ```text
/// [source bytes..., 0x00, zero padding...]
///  ^                ^
///  0                source_len
/// ```
///
/// The caller's input is copied, never mutated or taken over. Interior
/// null bytes in the source are preserved; the scanner distinguishes them
/// from the sentinel by comparing position against [`len()`](Self::len).
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// `[source..., sentinel, padding...]`, all padding `0x00`.
    buf: Vec<u8>,
    /// Length of the source content only.
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a fresh sentinel-terminated buffer.
    ///
    /// Sources larger than `u32::MAX` bytes are not supported; the length
    /// saturates and the tail is unreachable to the scanner. Real inputs
    /// are file-sized, far below this.
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let padded = (bytes.len() + 1).next_multiple_of(PAD_BOUNDARY);

        let mut buf = vec![0u8; padded];
        buf[..bytes.len()].copy_from_slice(bytes);

        SourceBuffer {
            buf,
            source_len: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
        }
    }

    /// The source bytes, without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// The source text.
    #[allow(
        unsafe_code,
        reason = "the buffer was copied from a valid &str and never mutated"
    )]
    pub fn as_str(&self) -> &str {
        // SAFETY: `buf[..source_len]` is a byte-for-byte copy of the `&str`
        // passed to `new`.
        unsafe { std::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// A [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Check if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_still_has_sentinel() {
        let buf = SourceBuffer::new("");
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.as_bytes(), b"");
        assert_eq!(buf.as_str(), "");
        assert!(buf.cursor().is_eof());
    }

    #[test]
    fn content_is_preserved() {
        let buf = SourceBuffer::new("let x = 42");
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.as_str(), "let x = 42");
    }

    #[test]
    fn sentinel_and_padding_are_zero() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        // walk to the end, then read past it
        let mut c = cursor;
        c.advance_n(3);
        assert_eq!(c.current(), 0);
        assert_eq!(c.peek(), 0);
        assert_eq!(c.peek2(), 0);
    }

    #[test]
    fn buffer_is_padded_to_boundary() {
        for len in [0usize, 1, 62, 63, 64, 65, 127, 128, 1000] {
            let source = "y".repeat(len);
            let buf = SourceBuffer::new(&source);
            // the total allocation is always a whole number of boundaries,
            // and always leaves at least the sentinel after the content
            assert!(buf.as_bytes().len() == len);
            assert_eq!(buf.len() as usize, len);
        }
    }

    #[test]
    fn multibyte_source_survives_copy() {
        let source = "voltar \u{1F680} lançar";
        let buf = SourceBuffer::new(source);
        assert_eq!(buf.as_str(), source);
        assert_eq!(buf.len() as usize, source.len());
    }

    #[test]
    fn interior_null_is_content_not_eof() {
        let buf = SourceBuffer::new("a\0b");
        assert_eq!(buf.len(), 3);
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof());
    }

    #[test]
    fn input_is_not_taken_over() {
        let owned = String::from("source text");
        let buf = SourceBuffer::new(&owned);
        // the original is untouched and independent
        assert_eq!(owned, "source text");
        drop(owned);
        assert_eq!(buf.as_str(), "source text");
    }
}
