//! CLI commands.
//!
//! Each command loads its input, runs the relevant stage, prints results to
//! stdout, and reports problems on stderr. Lexical errors are not fatal to
//! the scan itself - the scanner always completes - but any recorded error
//! makes the command exit non-zero.

use nova_ir::{Arena, TokenList};
use nova_lexer_core::SourceBuffer;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use crate::input;

/// `nova lex <file>`: scan a source file and dump the token stream.
pub fn lex_file(path: &str) -> ExitCode {
    let arena = Arena::new();
    let source = match input::load_source_in(&arena, Path::new(path)) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    debug!(bytes = source.len(), "source loaded");

    let buffer = SourceBuffer::new(source);
    let (tokens, errors) = nova_lexer::lex(&buffer);
    debug!(
        tokens = tokens.len(),
        errors = errors.len(),
        "scan complete"
    );

    print_tokens(&tokens);

    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        for error in &errors {
            eprintln!("error: {path}:{error}");
        }
        eprintln!(
            "{} error{} found",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        );
        ExitCode::FAILURE
    }
}

/// `nova info <file>`: file metadata and a short content preview.
pub fn info_file(path: &str) -> ExitCode {
    const PREVIEW_LINES: usize = 10;

    let source = match input::load_source(Path::new(path)) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let lines = source.lines().count();

    println!("=== File Information ===");
    println!("Path:  {path}");
    println!("Size:  {} bytes", source.len());
    println!("Lines: {lines}");
    println!("Preview:");
    println!("----------------");
    for line in source.lines().take(PREVIEW_LINES) {
        println!("{line}");
    }
    if lines > PREVIEW_LINES {
        println!("... (truncated)");
    }
    println!("----------------");
    ExitCode::SUCCESS
}

/// One line per token: position, category, lexeme.
fn print_tokens(tokens: &TokenList<'_>) {
    for token in tokens {
        let location = format!("{}", token.pos);
        let kind = format!("{:?}", token.kind);
        println!("{location:>8}  {kind:<12} {:?}", token.text);
    }
}
