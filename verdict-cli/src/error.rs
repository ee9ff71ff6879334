//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// A document could not be decoded as an outcome
    DecodeError {
        /// Where the document came from
        source: String,
        /// Decoder message
        message: String,
    },
    /// `--fail-on-failure` was set and some documents are failures
    FailedOutcomes {
        /// Number of failed documents
        failed: usize,
        /// Number of documents inspected
        total: usize,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::DecodeError { source, message } => {
                write!(f, "Cannot decode {source}: {message}")
            }
            CliError::FailedOutcomes { failed, total } => {
                write!(f, "{failed} of {total} outcome(s) are failures")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
