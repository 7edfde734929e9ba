//! Errors reading and writing document files

use std::path::PathBuf;

use thiserror::Error;

/// Failure loading or saving a document
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing failed part way
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A native file whose header is malformed or unterminated
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl FormatError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    /// Message for the status line
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound(_) => format!("File not found: {}", filename),
            Self::Io(err) => format!("Error accessing {}: {}", filename, err),
            Self::InvalidFormat(msg) => format!("{} is not a valid document: {}", filename, msg),
        }
    }
}
