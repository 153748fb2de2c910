//! Source file loading and validation.
//!
//! The scanner assumes a validated, already-loaded buffer; this module is
//! the collaborator that produces one. Failures are distinct per cause so
//! the CLI can report exactly what is wrong with a path.

use nova_ir::Arena;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The expected source file extension (compared case-insensitively).
pub const SOURCE_EXTENSION: &str = "nova";

/// Why a source path could not be loaded.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file does not exist: {0}")]
    Missing(PathBuf),

    #[error("path is not a regular file: {0}")]
    NotRegular(PathBuf),

    #[error("invalid extension `{found}`; expected `.{SOURCE_EXTENSION}`")]
    WrongExtension { found: String },

    #[error("file is empty: {0}")]
    Empty(PathBuf),

    #[error("could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load and validate a source file.
///
/// Checks, in order: existence, regular-file-ness, extension, readability,
/// non-emptiness. Each failure is a distinct [`InputError`].
pub fn load_source(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::Missing(path.to_owned()));
    }
    if !path.is_file() {
        return Err(InputError::NotRegular(path.to_owned()));
    }
    validate_extension(path)?;

    let text = fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_owned(),
        source,
    })?;
    if text.is_empty() {
        return Err(InputError::Empty(path.to_owned()));
    }
    Ok(text)
}

/// Load a source file into a caller-owned [`Arena`].
///
/// The returned text lives as long as the arena, so the token stream
/// derived from it shares the arena's bulk lifetime.
pub fn load_source_in<'a>(arena: &'a Arena, path: &Path) -> Result<&'a str, InputError> {
    let text = load_source(path)?;
    Ok(arena.alloc_str(&text))
}

fn validate_extension(path: &Path) -> Result<(), InputError> {
    let found = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if found.eq_ignore_ascii_case(SOURCE_EXTENSION) {
        Ok(())
    } else {
        Err(InputError::WrongExtension {
            found: found.to_owned(),
        })
    }
}
