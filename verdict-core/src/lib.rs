//! Typed success/failure outcomes with structured error trees
//!
//! An [`Outcome`] records whether an operation succeeded, the [`Status`] it
//! finished with, informational messages and a list of [`ErrorInfo`] trees.
//! [`ValueOutcome`] additionally carries a value. Success is never stored: it
//! is derived from the status code and the absence of errors.
//!
//! The [`json`] module encodes outcomes to a stable JSON shape and decodes
//! them back, tolerating missing, reordered, unknown and malformed properties
//! below the top level.
//!
//! # Example
//!
//! ```rust
//! use verdict_core::{ErrorInfo, Outcome, OutcomeView, Status, ValueOutcome};
//!
//! let found = ValueOutcome::success(42).with_message("ok");
//! assert!(found.is_success());
//!
//! let rejected = Outcome::failure(ErrorInfo::validation("Name.Empty", "Name is required"));
//! assert_eq!(rejected.status(), &Status::BAD_REQUEST);
//! assert_eq!(rejected.first_error_message(), Some("Name is required"));
//!
//! let text = serde_json::to_string(&found).unwrap();
//! let back: ValueOutcome<i32> = serde_json::from_str(&text).unwrap();
//! assert_eq!(back, found);
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod error;
pub mod error_info;
pub mod json;
pub mod outcome;
pub mod registry;
pub mod status;

pub use category::{ErrorCategory, UnknownCategory};
pub use error::{Error, Result};
pub use error_info::{ErrorInfo, Walk};
pub use json::{AnyOutcome, CodecOptions, Container, JsonCodec, NamingPolicy, Shape};
pub use outcome::{Outcome, OutcomeView, ValueOutcome};
pub use registry::StatusRegistry;
pub use status::{Status, SUCCESS_RANGE};
