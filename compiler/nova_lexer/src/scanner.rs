//! The scanning state machine.
//!
//! A left-to-right pass over a sentinel-terminated [`SourceBuffer`] with
//! one to two bytes of lookahead. The only rewind is bounded: a tentative
//! numeric type suffix is re-scanned as its own token when the classifier
//! rejects it, via a saved [`Cursor`] checkpoint.
//!
//! Per step, in priority order: whitespace, `//` comments, `/* */`
//! comments, operators/punctuation (longest classifier match, 3-2-1
//! bytes), identifiers/keywords, numbers, strings, and an `Unknown`
//! fallback that always advances one character. Malformed constructs are
//! recorded and scanning continues; the stream always ends in `End`.

use crate::classifier::{classify, classify_bytes};
use crate::lex_error::LexError;
use nova_ir::{SourcePosition, Span, Token, TokenKind, TokenList};
use nova_lexer_core::{Cursor, SourceBuffer};

/// 256-byte lookup table for identifier continuation bytes:
/// a-z, A-Z, 0-9, and underscore. The sentinel (`0x00`) maps to `false`,
/// naturally terminating scanning loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(i as u8, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_');
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE[b as usize]
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// One scan over one source buffer.
///
/// Owns its position tracker and output buffers; the only state shared
/// with other scans is the read-only classifier and the read-only source.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    /// Live position tracker; each token snapshots it at lexeme start.
    pos: SourcePosition,
    tokens: TokenList<'src>,
    errors: Vec<LexError>,
}

impl<'src> Scanner<'src> {
    /// Create a scanner at the start of `source`.
    pub fn new(source: &'src SourceBuffer) -> Self {
        Scanner {
            cursor: source.cursor(),
            pos: SourcePosition::START,
            tokens: TokenList::with_capacity(source.len() as usize / 4 + 1),
            errors: Vec::new(),
        }
    }

    /// Run the scan to completion.
    ///
    /// Always returns both the full token stream (ending in `End`) and the
    /// accumulated error list; deciding whether any error is fatal is the
    /// caller's job.
    pub fn run(mut self) -> (TokenList<'src>, Vec<LexError>) {
        while !self.cursor.is_eof() {
            self.step();
        }
        let end = self.cursor.pos();
        self.tokens.push(Token::new(
            TokenKind::End,
            self.cursor.slice(end, end),
            Span::point(end),
            self.pos,
        ));
        (self.tokens, self.errors)
    }

    /// Consume one construct: trivia, a token, or an error.
    fn step(&mut self) {
        match self.cursor.current() {
            b' ' | b'\t' | b'\r' => {
                self.cursor.advance();
                self.pos.advance(1);
            }
            b'\n' => {
                self.cursor.advance();
                self.pos.newline();
            }
            b'/' if self.cursor.peek() == b'/' => self.line_comment(),
            b'/' if self.cursor.peek() == b'*' => self.block_comment(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.ident_or_keyword(),
            b'0'..=b'9' => self.number(),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number(),
            b'"' => self.string(),
            b'&' | b'|' | b'=' | b'!' | b'>' | b'<' | b'+' | b'-' | b'*' | b'/' | b'%' | b'('
            | b')' | b'{' | b'}' | b'[' | b']' | b',' | b';' | b':' | b'.' => {
                // single `&` and `|` are not reserved; the probe fails and
                // they fall through to the unknown path
                if !self.operator() {
                    self.unknown();
                }
            }
            _ => self.unknown(),
        }
    }

    // --- Trivia ---------------------------------------------------------

    fn line_comment(&mut self) {
        let start = self.cursor.pos();
        self.cursor.skip_to_line_end();
        self.pos.advance(self.cursor.pos() - start);
        // the terminating newline, if any, is handled by the next step
    }

    fn block_comment(&mut self) {
        let start = self.cursor.pos();
        let start_pos = self.pos;
        self.cursor.advance_n(2); // consume "/*"

        let mut terminated = false;
        while !self.cursor.is_eof() {
            if self.cursor.current() == b'*' && self.cursor.peek() == b'/' {
                self.cursor.advance_n(2);
                terminated = true;
                break;
            }
            self.cursor.advance();
        }

        if !terminated {
            self.errors.push(LexError::unterminated_block_comment(
                Span::new(start, self.cursor.pos()),
                start_pos,
            ));
        }
        self.track_from(start);
    }

    // --- Tokens ---------------------------------------------------------

    /// Probe 3-, then 2-, then 1-byte candidates against the classifier,
    /// taking the longest one it resolves. Returns `false` when nothing
    /// matched.
    fn operator(&mut self) -> bool {
        let start = self.cursor.pos();
        let start_pos = self.pos;
        let mut len = self.cursor.remaining().min(3);
        while len >= 1 {
            let kind = classify_bytes(self.cursor.byte_slice(start, start + len));
            if kind != TokenKind::Ident {
                self.cursor.advance_n(len);
                self.pos.advance(len);
                self.emit(kind, start, start_pos);
                return true;
            }
            len -= 1;
        }
        false
    }

    fn ident_or_keyword(&mut self) {
        let start = self.cursor.pos();
        let start_pos = self.pos;
        self.cursor.advance(); // first byte already validated
        self.cursor.eat_while(is_ident_continue);

        let kind = classify(self.cursor.slice_from(start));
        self.pos.advance(self.cursor.pos() - start);
        self.emit(kind, start, start_pos);
    }

    fn number(&mut self) {
        let start = self.cursor.pos();
        let start_pos = self.pos;
        let mut kind = TokenKind::Int;

        // base prefix after a leading zero
        if self.cursor.current() == b'0' {
            match self.cursor.peek() {
                b'x' | b'X' => {
                    kind = TokenKind::HexInt;
                    self.cursor.advance_n(2);
                }
                // require a binary digit after the prefix so a bare `0b`
                // stays a decimal zero followed by a rejected suffix
                b'b' | b'B' if matches!(self.cursor.peek2(), b'0' | b'1' | b'_') => {
                    kind = TokenKind::BinInt;
                    self.cursor.advance_n(2);
                }
                _ => {}
            }
        }

        match kind {
            TokenKind::HexInt => {
                self.cursor.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
            }
            TokenKind::BinInt => {
                self.cursor.eat_while(|b| matches!(b, b'0' | b'1' | b'_'));
            }
            _ => {
                // decimal: digits, `_` separators, and one promoting dot
                let mut is_float = false;
                loop {
                    let b = self.cursor.current();
                    if b.is_ascii_digit() || b == b'_' {
                        self.cursor.advance();
                    } else if b == b'.' && !is_float {
                        is_float = true;
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
                if is_float {
                    kind = TokenKind::Float;
                }
            }
        }

        // A trailing identifier run is tentatively a type suffix. Keep it
        // only if the classifier recognizes it; otherwise rewind so it is
        // re-scanned as its own token.
        if is_ident_start(self.cursor.current()) {
            let checkpoint = self.cursor;
            let suffix_start = self.cursor.pos();
            self.cursor.advance();
            self.cursor.eat_while(is_ident_continue);
            if classify(self.cursor.slice_from(suffix_start)) != TokenKind::Type {
                self.cursor = checkpoint;
            }
        }

        self.pos.advance(self.cursor.pos() - start);
        self.emit(kind, start, start_pos);
    }

    fn string(&mut self) {
        let start = self.cursor.pos();
        let start_pos = self.pos;
        self.cursor.advance(); // opening quote

        let mut terminated = false;
        loop {
            match self.cursor.skip_to_string_delim() {
                b'"' => {
                    self.cursor.advance();
                    terminated = true;
                    break;
                }
                b'\\' => {
                    // a backslash escapes exactly the next character
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance();
                    }
                }
                // strings may span lines; the newline is content
                b'\n' => self.cursor.advance(),
                _ => break, // end of buffer
            }
        }

        if !terminated {
            self.errors.push(LexError::unterminated_string(
                Span::new(start, self.cursor.pos()),
                start_pos,
            ));
        }
        self.track_from(start);
        // emitted even when unterminated, so the stream stays structurally
        // complete
        self.emit(TokenKind::Str, start, start_pos);
    }

    fn unknown(&mut self) {
        let start = self.cursor.pos();
        let start_pos = self.pos;
        self.cursor.advance_char(); // exactly one character, never stall

        let text = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.pos());
        let ch = text.chars().next().unwrap_or('\u{FFFD}');
        self.errors
            .push(LexError::unknown_character(ch, span, start_pos));
        self.pos.advance(1);
        self.tokens
            .push(Token::new(TokenKind::Unknown, text, span, start_pos));
    }

    // --- Helpers --------------------------------------------------------

    /// Emit a token for `start..cursor` with the given start-of-lexeme
    /// position snapshot.
    fn emit(&mut self, kind: TokenKind, start: u32, pos: SourcePosition) {
        let end = self.cursor.pos();
        self.tokens.push(Token::new(
            kind,
            self.cursor.slice(start, end),
            Span::new(start, end),
            pos,
        ));
    }

    /// Update the position tracker across `start..cursor`, which may
    /// contain newlines (strings, block comments). Columns count bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "lexeme lengths are bounded by source_len which fits in u32"
    )]
    fn track_from(&mut self, start: u32) {
        let bytes = self.cursor.byte_slice(start, self.cursor.pos());
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => {
                let newlines = memchr::memchr_iter(b'\n', bytes).count() as u32;
                self.pos.line += newlines;
                self.pos.column = (bytes.len() - last) as u32;
            }
            None => self.pos.advance(bytes.len() as u32),
        }
    }
}
