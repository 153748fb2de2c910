//! Nova compiler driver.
//!
//! Thin glue around the compiler crates: source loading and validation
//! ([`input`]), and the CLI commands ([`commands`]). The interesting work
//! happens in `nova_lexer`; this crate owns the per-compilation
//! [`Arena`](nova_ir::Arena) and decides what counts as a fatal outcome.

pub mod commands;
pub mod input;
