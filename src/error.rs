//! Error types for record service operations.
//!
//! This module provides the [`CerlError`] type for all library operations
//! and the [`Result`] convenience type.

use std::fmt;

use thiserror::Error;

/// How a sequence failed to contain exactly one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The sequence had no elements.
    Empty,
    /// The sequence had more than one element (the count is attached).
    Multiple(usize),
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "sequence is empty"),
            Self::Multiple(n) => write!(f, "sequence contains {n} elements"),
        }
    }
}

/// Error type for all record service operations.
///
/// Transport and status failures surface only after the configured retry
/// policy has been exhausted.
#[derive(Error, Debug)]
pub enum CerlError {
    /// Network-level failure (DNS, connect, read) talking to the service.
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// The requested URL
        url: String,
        /// Description of the underlying failure
        message: String,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// The requested URL
        url: String,
        /// The final HTTP status code
        status: u16,
    },

    /// The response body was not JSON, or did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A value was expected to occur exactly once.
    #[error("Cardinality error: {0}")]
    Cardinality(Cardinality),

    /// A value was present but of the wrong JSON type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The expected JSON type
        expected: &'static str,
        /// The value that was found, rendered as JSON
        found: String,
    },
}

impl CerlError {
    /// Shorthand for [`CerlError::MalformedResponse`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Convenience type alias for [`std::result::Result`] with [`CerlError`].
pub type Result<T> = std::result::Result<T, CerlError>;
