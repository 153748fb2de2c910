//! Low-level scanning substrate for the Nova lexer.
//!
//! Provides the two building blocks the scanner sits on:
//!
//! - [`SourceBuffer`]: copies the source into a sentinel-terminated,
//!   zero-padded buffer so the scanner can read ahead without per-byte
//!   bounds checks.
//! - [`Cursor`]: a [`Copy`] cursor over that buffer with one and two bytes
//!   of lookahead and memchr-accelerated skips for comment and string
//!   bodies.
//!
//! This crate is standalone by design: no `nova_*` dependencies, so
//! external tools can reuse it without pulling in the toolchain.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;
