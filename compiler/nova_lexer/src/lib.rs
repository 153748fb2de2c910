//! Lexer for the Nova toolchain.
//!
//! Turns a [`SourceBuffer`] into a classified, located token stream plus an
//! accumulated error list:
//!
//! - [`classifier`]: an immutable perfect-hash table, built once at compile
//!   time, resolving reserved words, operators, and punctuation to their
//!   token categories in O(1).
//! - [`Scanner`]: the hand-written scanning state machine covering nested
//!   literal forms (escaped strings, based/suffixed numbers, multi-line
//!   comments).
//!
//! The scanner always completes a full pass: malformed constructs are
//! recorded as [`LexError`] values paired with best-effort tokens, and the
//! stream always ends in an [`End`](nova_ir::TokenKind::End) token. Whether
//! any accumulated error is fatal is the caller's decision.
//!
//! ```
//! use nova_lexer_core::SourceBuffer;
//! use nova_ir::TokenKind;
//!
//! let source = SourceBuffer::new("let x = 42;");
//! let (tokens, errors) = nova_lexer::lex(&source);
//! assert!(errors.is_empty());
//! assert_eq!(tokens[0].kind, TokenKind::Let);
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
//! ```

pub mod classifier;
mod lex_error;
mod scanner;

pub use lex_error::{LexError, LexErrorKind};
pub use scanner::Scanner;

use nova_ir::TokenList;
use nova_lexer_core::SourceBuffer;

/// Scan `source` into a token stream and an error list.
///
/// The token stream always ends in `End`; the error list is empty for
/// well-formed input. Tokens borrow the source buffer, which must outlive
/// them.
pub fn lex(source: &SourceBuffer) -> (TokenList<'_>, Vec<LexError>) {
    Scanner::new(source).run()
}
