//! Shared primitives for all Rust crates in the Galaxy RBAC harness.

#![forbid(unsafe_code)]

/// Authentication primitives shared across crates.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{Credentials, GalaxyAuth};

/// Result type used across harness crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common error categories for remote calls and scenario checks.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input, or the server rejected a payload (HTTP 400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state (HTTP 409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Session is not authenticated (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Session is authenticated but blocked by authorization policy (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Request could not be sent or its response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// A polled resource did not settle before its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// A scenario expectation about server behavior did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps an HTTP failure status to its error category.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 | 422 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Internal(message),
        }
    }
}

/// Fails with [`AppError::Assertion`] when `condition` does not hold.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> AppResult<()> {
    if condition {
        Ok(())
    } else {
        Err(AppError::Assertion(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString, ensure};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn status_codes_map_to_categories() {
        assert!(matches!(
            AppError::from_status(403, "denied".to_owned()),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            AppError::from_status(404, "missing".to_owned()),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from_status(502, "bad gateway".to_owned()),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn ensure_reports_assertion_message() {
        let result = ensure(1 + 1 == 3, || "count was 2".to_owned());
        assert!(matches!(result, Err(AppError::Assertion(message)) if message == "count was 2"));
        assert!(ensure(true, String::new).is_ok());
    }
}
