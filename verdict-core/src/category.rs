//! Error categories

use std::fmt;
use std::str::FromStr;

use crate::status::Status;

/// Broad classification of an [`ErrorInfo`](crate::ErrorInfo)
///
/// The discriminant is the wire ordinal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ErrorCategory {
    /// A generic, expected failure
    #[default]
    Failure = 0,
    /// An unexpected failure such as a bug or an unavailable dependency
    Unexpected = 1,
    /// Input failed validation
    Validation = 2,
    /// A requested resource does not exist
    NotFound = 3,
    /// The operation conflicts with current state
    Conflict = 4,
    /// The caller is not authenticated
    Unauthorized = 5,
    /// The caller is not allowed to perform the operation
    Forbidden = 6,
    /// The operation did not complete in time
    Timeout = 7,
    /// A dependency is temporarily unavailable
    Unavailable = 8,
}

impl ErrorCategory {
    /// Every category in ordinal order
    pub const ALL: [ErrorCategory; 9] = [
        ErrorCategory::Failure,
        ErrorCategory::Unexpected,
        ErrorCategory::Validation,
        ErrorCategory::NotFound,
        ErrorCategory::Conflict,
        ErrorCategory::Unauthorized,
        ErrorCategory::Forbidden,
        ErrorCategory::Timeout,
        ErrorCategory::Unavailable,
    ];

    /// Wire ordinal
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Category for a wire ordinal
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Symbolic name
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Failure => "Failure",
            ErrorCategory::Unexpected => "Unexpected",
            ErrorCategory::Validation => "Validation",
            ErrorCategory::NotFound => "NotFound",
            ErrorCategory::Conflict => "Conflict",
            ErrorCategory::Unauthorized => "Unauthorized",
            ErrorCategory::Forbidden => "Forbidden",
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::Unavailable => "Unavailable",
        }
    }

    /// Case-insensitive name match; numeric text is read as an ordinal.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Ok(ordinal) = name.parse::<u64>() {
            return Self::from_ordinal(ordinal);
        }
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }

    /// Status that failure factories use when this category leads the error list
    pub fn default_status(self) -> Status {
        match self {
            ErrorCategory::Failure | ErrorCategory::Validation => Status::BAD_REQUEST,
            ErrorCategory::Unexpected => Status::ERROR,
            ErrorCategory::NotFound => Status::NOT_FOUND,
            ErrorCategory::Conflict => Status::CONFLICT,
            ErrorCategory::Unauthorized => Status::UNAUTHORIZED,
            ErrorCategory::Forbidden => Status::FORBIDDEN,
            ErrorCategory::Timeout => Status::GATEWAY_TIMEOUT,
            ErrorCategory::Unavailable => Status::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for ErrorCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
