//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building request or option types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is empty or is not a valid method token.
    #[error("unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),

    /// The body mode is not one of the known modes.
    #[error("unknown body mode: {0}")]
    UnknownBodyMode(String),

    /// The codegen target is not known.
    #[error("unknown codegen target: {0}")]
    UnknownTarget(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
