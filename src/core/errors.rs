//! Shared error types for the application

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for nestmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Parsing errors
    #[error("parse error in {file}:{line}:{column}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Directory walk errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a parse error with location
    pub fn parse(file: &Path, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.to_path_buf(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
