//! Nova IR - shared data layer for the Nova toolchain.
//!
//! This crate contains the core data structures every later stage builds on:
//! - [`Span`] byte-offset source locations
//! - [`SourcePosition`] human-facing line/column positions
//! - [`Token`], [`TokenKind`] and [`TokenList`] for lexer output
//! - [`Node`] and [`NodeArena`] - the shared token/syntax-node shape the
//!   parser will allocate into
//! - [`Arena`] - the bump allocator whose bulk lifetime governs every
//!   buffer and string payload derived from one compilation
//!
//! # Design Philosophy
//!
//! - **Flatten everything**: no `Box<Node>`; child links are `NodeId(u32)`
//!   handles into one owning store per compilation unit.
//! - **Borrow, don't copy**: tokens keep non-owning views into the source
//!   buffer; text that must outlive the buffer is duplicated into the
//!   [`Arena`].
//! - **Bulk lifetime**: nothing allocated from an [`Arena`] is freed
//!   individually; the arena is reset or dropped as a whole.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod node;
mod position;
mod span;
mod token;

pub use arena::Arena;
pub use node::{Node, NodeArena, NodeId, NodeKind, NodePayload, NodeRange};
pub use position::SourcePosition;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
