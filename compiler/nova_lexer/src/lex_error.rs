//! Lexical error values.
//!
//! Errors are accumulated, not raised: the scanner records every problem it
//! finds and finishes the pass, so one run reports all of them. Each error
//! carries WHERE (byte span + line/column) and WHAT (kind); the paired
//! best-effort token keeps the stream structurally usable.

use nova_ir::{SourcePosition, Span};
use std::fmt;

/// A recoverable lexical error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Byte span of the offending construct.
    pub span: Span,
    /// Line/column where the construct started.
    pub pos: SourcePosition,
}

/// What kind of lexical error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Buffer ended before the closing `"` of a string literal.
    UnterminatedString,
    /// Buffer ended before the closing `*/` of a block comment.
    UnterminatedBlockComment,
    /// A character no token rule accepts.
    UnknownCharacter { ch: char },
}

impl LexError {
    /// Buffer ended inside a string literal.
    #[cold]
    pub fn unterminated_string(span: Span, pos: SourcePosition) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            span,
            pos,
        }
    }

    /// Buffer ended inside a block comment.
    #[cold]
    pub fn unterminated_block_comment(span: Span, pos: SourcePosition) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedBlockComment,
            span,
            pos,
        }
    }

    /// A character no token rule accepts.
    #[cold]
    pub fn unknown_character(ch: char, span: Span, pos: SourcePosition) -> Self {
        LexError {
            kind: LexErrorKind::UnknownCharacter { ch },
            span,
            pos,
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            LexErrorKind::UnterminatedBlockComment => f.write_str("unterminated block comment"),
            LexErrorKind::UnknownCharacter { ch } => {
                write!(f, "unknown character `{}`", ch.escape_default())
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.kind)
    }
}
