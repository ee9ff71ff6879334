//! Outcome containers
//!
//! [`Outcome`] carries a status, errors and messages. [`ValueOutcome`] adds an
//! optional value. Both expose their common state through [`OutcomeView`].
//!
//! Success is derived, never stored: a container succeeds when its status
//! code is in the success range and it carries no errors.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error_info::ErrorInfo;
use crate::status::Status;

/// Read access shared by every outcome shape
pub trait OutcomeView {
    /// Status of the outcome
    fn status(&self) -> &Status;

    /// Errors in the order they were recorded
    fn errors(&self) -> &[ErrorInfo];

    /// Informational messages
    fn messages(&self) -> &[String];

    /// Message of the first error, falling back to its code
    fn first_error_message(&self) -> Option<&str>;

    /// Status code in the success range and no errors
    fn is_success(&self) -> bool {
        self.status().is_success_code() && self.errors().is_empty()
    }

    /// Negation of [`OutcomeView::is_success`]
    fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

impl<V: OutcomeView + ?Sized> OutcomeView for &V {
    fn status(&self) -> &Status {
        (**self).status()
    }
    fn errors(&self) -> &[ErrorInfo] {
        (**self).errors()
    }
    fn messages(&self) -> &[String] {
        (**self).messages()
    }
    fn first_error_message(&self) -> Option<&str> {
        (**self).first_error_message()
    }
}

impl<V: OutcomeView + ?Sized> OutcomeView for Box<V> {
    fn status(&self) -> &Status {
        (**self).status()
    }
    fn errors(&self) -> &[ErrorInfo] {
        (**self).errors()
    }
    fn messages(&self) -> &[String] {
        (**self).messages()
    }
    fn first_error_message(&self) -> Option<&str> {
        (**self).first_error_message()
    }
}

impl<V: OutcomeView + ?Sized> OutcomeView for Arc<V> {
    fn status(&self) -> &Status {
        (**self).status()
    }
    fn errors(&self) -> &[ErrorInfo] {
        (**self).errors()
    }
    fn messages(&self) -> &[String] {
        (**self).messages()
    }
    fn first_error_message(&self) -> Option<&str> {
        (**self).first_error_message()
    }
}

const UNSPECIFIED_FAILURE_CODE: &str = "Outcome.Failure";
const UNSPECIFIED_FAILURE_MESSAGE: &str = "An unspecified failure occurred";

/// State common to both container shapes
#[derive(Clone)]
struct Body {
    status: Status,
    errors: Vec<ErrorInfo>,
    messages: Vec<String>,
    first_error: OnceLock<Option<String>>,
}

impl Body {
    fn new(status: Status, errors: Vec<ErrorInfo>, messages: Vec<String>) -> Self {
        Self {
            status,
            errors,
            messages,
            first_error: OnceLock::new(),
        }
    }

    fn failure(status: Option<Status>, errors: Vec<ErrorInfo>) -> Self {
        let errors = if errors.is_empty() {
            vec![ErrorInfo::unexpected(
                UNSPECIFIED_FAILURE_CODE,
                UNSPECIFIED_FAILURE_MESSAGE,
            )]
        } else {
            errors
        };
        let status = status.unwrap_or_else(|| errors[0].category().default_status());
        Self::new(status, errors, Vec::new())
    }

    fn first_error_message(&self) -> Option<&str> {
        self.first_error
            .get_or_init(|| {
                let first = self.errors.first()?;
                [first.message(), first.code()]
                    .into_iter()
                    .find(|text| !text.is_empty())
                    .map(str::to_owned)
            })
            .as_deref()
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.errors == other.errors
            && self.messages == other.messages
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("status", &self.status)
            .field("errors", &self.errors)
            .field("messages", &self.messages)
            .finish()
    }
}

macro_rules! body_view {
    ($ty:ty $(, $param:ident)?) => {
        impl$(<$param>)? OutcomeView for $ty {
            fn status(&self) -> &Status {
                &self.body.status
            }
            fn errors(&self) -> &[ErrorInfo] {
                &self.body.errors
            }
            fn messages(&self) -> &[String] {
                &self.body.messages
            }
            fn first_error_message(&self) -> Option<&str> {
                self.body.first_error_message()
            }
        }
    };
}

/// Outcome without a value
#[derive(Clone, PartialEq)]
pub struct Outcome {
    body: Body,
}

body_view!(Outcome);

impl Outcome {
    /// Success with [`Status::OK`]
    pub fn success() -> Self {
        Self::success_with_status(Status::OK)
    }

    /// Success with an explicit status
    pub fn success_with_status(status: Status) -> Self {
        Self::from_parts(status, Vec::new(), Vec::new())
    }

    /// Failure whose status follows the error's category
    pub fn failure(error: ErrorInfo) -> Self {
        Self::failures([error])
    }

    /// Failure with an explicit status
    pub fn failure_with_status(status: Status, error: ErrorInfo) -> Self {
        Self::failures_with_status(status, [error])
    }

    /// Failure carrying several errors; status follows the first error's
    /// category. An empty list records a generic unexpected error.
    pub fn failures(errors: impl IntoIterator<Item = ErrorInfo>) -> Self {
        Self {
            body: Body::failure(None, errors.into_iter().collect()),
        }
    }

    /// Failure carrying several errors with an explicit status
    pub fn failures_with_status(
        status: Status,
        errors: impl IntoIterator<Item = ErrorInfo>,
    ) -> Self {
        Self {
            body: Body::failure(Some(status), errors.into_iter().collect()),
        }
    }

    /// Assemble an outcome without enforcing the factory invariants
    pub fn from_parts(status: Status, errors: Vec<ErrorInfo>, messages: Vec<String>) -> Self {
        Self {
            body: Body::new(status, errors, messages),
        }
    }

    /// Append an informational message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.messages.push(message.into());
        self
    }

    /// Append informational messages
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.messages.extend(messages.into_iter().map(Into::into));
        self
    }

    /// Split into status, errors and messages
    pub fn into_parts(self) -> (Status, Vec<ErrorInfo>, Vec<String>) {
        (self.body.status, self.body.errors, self.body.messages)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome")
            .field("is_success", &self.is_success())
            .field("status", &self.body.status)
            .field("errors", &self.body.errors)
            .field("messages", &self.body.messages)
            .finish()
    }
}

impl From<ErrorInfo> for Outcome {
    fn from(error: ErrorInfo) -> Self {
        Self::failure(error)
    }
}

/// Outcome that may carry a value of type `T`
#[derive(Clone, PartialEq)]
pub struct ValueOutcome<T> {
    body: Body,
    value: Option<T>,
}

body_view!(ValueOutcome<T>, T);

impl<T> ValueOutcome<T> {
    /// Success carrying `value` with [`Status::OK`]
    pub fn success(value: T) -> Self {
        Self::success_with_status(value, Status::OK)
    }

    /// Success carrying `value` with an explicit status
    pub fn success_with_status(value: T, status: Status) -> Self {
        Self::from_parts(status, Vec::new(), Vec::new(), Some(value))
    }

    /// Failure whose status follows the error's category
    pub fn failure(error: ErrorInfo) -> Self {
        Self::failures([error])
    }

    /// Failure with an explicit status
    pub fn failure_with_status(status: Status, error: ErrorInfo) -> Self {
        Self::failures_with_status(status, [error])
    }

    /// Failure carrying several errors; an empty list records a generic
    /// unexpected error.
    pub fn failures(errors: impl IntoIterator<Item = ErrorInfo>) -> Self {
        Self {
            body: Body::failure(None, errors.into_iter().collect()),
            value: None,
        }
    }

    /// Failure carrying several errors with an explicit status
    pub fn failures_with_status(
        status: Status,
        errors: impl IntoIterator<Item = ErrorInfo>,
    ) -> Self {
        Self {
            body: Body::failure(Some(status), errors.into_iter().collect()),
            value: None,
        }
    }

    /// Assemble an outcome without enforcing the factory invariants
    pub fn from_parts(
        status: Status,
        errors: Vec<ErrorInfo>,
        messages: Vec<String>,
        value: Option<T>,
    ) -> Self {
        Self {
            body: Body::new(status, errors, messages),
            value,
        }
    }

    /// Append an informational message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.messages.push(message.into());
        self
    }

    /// Append informational messages
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.messages.extend(messages.into_iter().map(Into::into));
        self
    }

    /// The carried value
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Take the carried value, discarding the rest
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Split into status, errors, messages and value
    pub fn into_parts(self) -> (Status, Vec<ErrorInfo>, Vec<String>, Option<T>) {
        (
            self.body.status,
            self.body.errors,
            self.body.messages,
            self.value,
        )
    }

    /// `Ok(value)` on success, `Err` with the valueless outcome on failure
    pub fn into_result(self) -> std::result::Result<Option<T>, Outcome> {
        if self.is_success() {
            Ok(self.value)
        } else {
            Err(Outcome { body: self.body })
        }
    }

    /// Transform the value of a success; failures pass through unchanged.
    pub fn map<U, F>(self, f: F) -> ValueOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        let success = self.is_success();
        ValueOutcome {
            value: self.value.filter(|_| success).map(f),
            body: self.body,
        }
    }

    /// Chain an operation that produces another outcome.
    ///
    /// Runs `f` only on a success carrying a value. Messages recorded so far
    /// are kept ahead of the ones produced by `f`.
    pub fn and_then<U, F>(self, f: F) -> ValueOutcome<U>
    where
        F: FnOnce(T) -> ValueOutcome<U>,
    {
        if !self.is_success() {
            return ValueOutcome {
                body: self.body,
                value: None,
            };
        }
        match self.value {
            Some(value) => {
                let mut next = f(value);
                let mut messages = self.body.messages;
                messages.append(&mut next.body.messages);
                next.body.messages = messages;
                next
            }
            None => ValueOutcome {
                body: self.body,
                value: None,
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueOutcome")
            .field("is_success", &self.is_success())
            .field("status", &self.body.status)
            .field("value", &self.value)
            .field("errors", &self.body.errors)
            .field("messages", &self.body.messages)
            .finish()
    }
}

impl<T> From<ValueOutcome<T>> for Outcome {
    fn from(outcome: ValueOutcome<T>) -> Self {
        Outcome { body: outcome.body }
    }
}

impl<T> From<ErrorInfo> for ValueOutcome<T> {
    fn from(error: ErrorInfo) -> Self {
        Self::failure(error)
    }
}
