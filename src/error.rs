//! Error types for package listing and symbol extraction.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::base::Position;
use crate::parser::SyntaxError;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while listing packages or extracting symbols.
#[derive(Debug, Error)]
pub enum Error {
    /// A package pattern could not be resolved.
    #[error("cannot list packages matching {pattern:?}: {message}")]
    Load { pattern: String, message: String },

    /// A package could not be located or has no buildable sources.
    #[error("cannot import {path:?}: {message}")]
    Import { path: String, message: String },

    /// A source file of the package has a syntax error.
    #[error("{}:{line}:{column}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    /// The parsed sources do not declare the package the loader expected.
    #[error("package {expected:?} not found in {} (found: {})", .dir.display(), .found.join(", "))]
    Consistency {
        dir: PathBuf,
        expected: String,
        found: Vec<String>,
    },

    /// Reading a file or directory, or writing output, failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The environment does not describe a usable Go installation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a pattern resolution error.
    pub fn load(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a package import error.
    pub fn import(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Import {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse error, mapping the error offset to a line and column of `source`.
    pub fn parse(file: impl Into<PathBuf>, source: &str, error: &SyntaxError) -> Self {
        let Position { line, column } = Position::of_offset(source, error.offset());
        Self::Parse {
            file: file.into(),
            line,
            column,
            message: error.to_string(),
        }
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
