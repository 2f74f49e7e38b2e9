//! Error hierarchy for hdbconnect-lazy.
//!
//! Follows the "canonical error struct" pattern from Microsoft Rust Guidelines.
//! Exposes `is_xxx()` methods rather than internal `ErrorKind` for future-proofing.
//!
//! Two failure classes exist and nothing is retried or transformed:
//!
//! - connection errors: the deferred connection attempt itself failed
//!   (unreachable host, rejected credentials, malformed URL or options)
//! - driver errors: a delegated operation failed after the connection was live

use thiserror::Error;

/// Root error type for the hdbconnect-lazy crate.
///
/// Driver messages pass through verbatim; this type only classifies them.
/// Use the predicate methods (`is_xxx()`) to distinguish a failed deferred
/// connection attempt from a failed delegated operation.
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct LazyHdbError {
    kind: ErrorKind,
}

/// Internal error classification.
///
/// This enum is `pub(crate)` to allow adding variants without breaking changes.
/// External code should use the `is_xxx()` predicate methods instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub(crate) enum ErrorKind {
    /// Establishing the deferred connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// A delegated operation failed on the live connection.
    #[error("driver error: {message}")]
    Driver {
        code: Option<i32>,
        message: String,
    },
}

impl LazyHdbError {
    /// Create an error for a failed connection attempt.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Connection {
                message: message.into(),
            },
        }
    }

    /// Create an error for a failed delegated operation.
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::driver_with_code(None, message)
    }

    /// Create a driver error carrying the server error code, when known.
    #[must_use]
    pub fn driver_with_code(code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Driver {
                code,
                message: message.into(),
            },
        }
    }

    /// Returns true if the deferred connection attempt failed.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self.kind, ErrorKind::Connection { .. })
    }

    /// Returns true if a delegated operation failed after connecting.
    #[must_use]
    pub const fn is_driver(&self) -> bool {
        matches!(self.kind, ErrorKind::Driver { .. })
    }

    /// Server error code of a driver error, when one was extractable.
    #[must_use]
    pub const fn driver_code(&self) -> Option<i32> {
        match self.kind {
            ErrorKind::Driver { code, .. } => code,
            ErrorKind::Connection { .. } => None,
        }
    }

    /// The underlying message, without the classification prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match &self.kind {
            ErrorKind::Connection { message } | ErrorKind::Driver { message, .. } => message,
        }
    }
}

impl From<url::ParseError> for LazyHdbError {
    fn from(err: url::ParseError) -> Self {
        Self::connection(format!("invalid connection URL: {err}"))
    }
}

/// Extract a HANA server error code from a driver error message.
///
/// Server errors carry their code either bracketed (`[301] unique constraint
/// violated`) or in an `Error 301: ...` prefix.
pub(crate) fn extract_server_error_code(message: &str) -> Option<i32> {
    let bracketed = message
        .split_once('[')
        .and_then(|(_, rest)| rest.split_once(']'))
        .and_then(|(code, _)| code.trim().parse().ok());
    if bracketed.is_some() {
        return bracketed;
    }

    message
        .split_once("Error ")
        .and_then(|(_, rest)| rest.split_once(':'))
        .and_then(|(code, _)| code.trim().parse().ok())
}

/// Result type alias for hdbconnect-lazy operations.
pub type Result<T> = std::result::Result<T, LazyHdbError>;
