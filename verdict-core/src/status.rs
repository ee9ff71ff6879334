//! Outcome status values
//!
//! A [`Status`] classifies an outcome the way a protocol status code does.
//! Codes in `[200, 300)` are successes, everything else is a failure.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::registry::StatusRegistry;

/// Range of codes that count as success
pub const SUCCESS_RANGE: Range<u32> = 200..300;

/// An immutable `(code, description)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Status {
    code: u32,
    description: Cow<'static, str>,
}

macro_rules! well_known {
    ($($(#[$doc:meta])* $name:ident = ($code:expr, $desc:expr);)*) => {
        impl Status {
            $(
                $(#[$doc])*
                pub const $name: Status = Status::well_known($code, $desc);
            )*

            /// Every well-known status, in code order
            pub const WELL_KNOWN: &'static [Status] = &[$(Status::$name),*];
        }
    };
}

well_known! {
    /// 200 OK
    OK = (200, "OK");
    /// 201 Created
    CREATED = (201, "Created");
    /// 202 Accepted
    ACCEPTED = (202, "Accepted");
    /// 204 No Content
    NO_CONTENT = (204, "No Content");
    /// 400 Bad Request
    BAD_REQUEST = (400, "Bad Request");
    /// 401 Unauthorized
    UNAUTHORIZED = (401, "Unauthorized");
    /// 403 Forbidden
    FORBIDDEN = (403, "Forbidden");
    /// 404 Not Found
    NOT_FOUND = (404, "Not Found");
    /// 405 Method Not Allowed
    METHOD_NOT_ALLOWED = (405, "Method Not Allowed");
    /// 408 Request Timeout
    REQUEST_TIMEOUT = (408, "Request Timeout");
    /// 409 Conflict
    CONFLICT = (409, "Conflict");
    /// 412 Precondition Failed
    PRECONDITION_FAILED = (412, "Precondition Failed");
    /// 415 Unsupported Media Type
    UNSUPPORTED_MEDIA_TYPE = (415, "Unsupported Media Type");
    /// 422 Unprocessable Entity
    UNPROCESSABLE_ENTITY = (422, "Unprocessable Entity");
    /// 429 Too Many Requests
    TOO_MANY_REQUESTS = (429, "Too Many Requests");
    /// 500, the internal failure status used when a document carries no usable status
    ERROR = (500, "Internal Server Error");
    /// 501 Not Implemented
    NOT_IMPLEMENTED = (501, "Not Implemented");
    /// 503 Service Unavailable
    SERVICE_UNAVAILABLE = (503, "Service Unavailable");
    /// 504 Gateway Timeout
    GATEWAY_TIMEOUT = (504, "Gateway Timeout");
}

impl Status {
    const fn well_known(code: u32, description: &'static str) -> Self {
        Self {
            code,
            description: Cow::Borrowed(description),
        }
    }

    /// Create a status that is not in the well-known set.
    ///
    /// The status is not registered; use [`Status::from_code`] to go through
    /// the process-wide registry.
    pub fn custom(code: u32, description: impl Into<Cow<'static, str>>) -> Result<Self> {
        if code == 0 {
            return Err(Error::InvalidStatusCode { code });
        }
        Ok(Self {
            code,
            description: description.into(),
        })
    }

    /// Look up a status by code in the global registry, registering a
    /// custom entry the first time an unknown code is requested.
    pub fn from_code(code: u32) -> Result<Self> {
        StatusRegistry::global().resolve(code)
    }

    /// Numeric code
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Human readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the code lies in the success range
    pub fn is_success_code(&self) -> bool {
        SUCCESS_RANGE.contains(&self.code)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::OK
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_count_and_order() {
        assert_eq!(Status::WELL_KNOWN.len(), 19);
        assert!(Status::WELL_KNOWN
            .windows(2)
            .all(|pair| pair[0].code() < pair[1].code()));
    }

    #[test]
    fn test_success_range() {
        assert!(Status::OK.is_success_code());
        assert!(Status::NO_CONTENT.is_success_code());
        assert!(!Status::BAD_REQUEST.is_success_code());
        assert!(!Status::custom(199, "Almost").unwrap().is_success_code());
        assert!(Status::custom(299, "Edge").unwrap().is_success_code());
        assert!(!Status::custom(300, "Redirect").unwrap().is_success_code());
    }

    #[test]
    fn test_custom_rejects_zero() {
        let err = Status::custom(0, "Nothing").unwrap_err();
        assert!(matches!(err, Error::InvalidStatusCode { code: 0 }));
    }

    #[test]
    fn test_value_equality() {
        let a = Status::custom(200, "OK").unwrap();
        assert_eq!(a, Status::OK);
        let b = Status::custom(200, String::from("Fine")).unwrap();
        assert_ne!(b, Status::OK);
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::ERROR.to_string(), "500 Internal Server Error");
    }
}
