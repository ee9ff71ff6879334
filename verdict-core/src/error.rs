//! Error types for outcome construction and the JSON codec

use thiserror::Error;

/// Errors raised by this crate
#[derive(Error, Debug)]
pub enum Error {
    /// Status codes must be positive
    #[error("invalid status code {code}: status codes must be positive")]
    InvalidStatusCode {
        /// The rejected code
        code: u32,
    },

    /// The document could not be parsed as an outcome
    #[error("malformed outcome document: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error comes from an unusable input document rather than
    /// from I/O or invalid arguments.
    pub fn is_structural(&self) -> bool {
        match self {
            Error::Json(err) => err.is_syntax() || err.is_data() || err.is_eof(),
            _ => false,
        }
    }
}

/// Result type for verdict operations
pub type Result<T> = std::result::Result<T, Error>;
