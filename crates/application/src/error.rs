//! Application error types

use snipgen_domain::{CodegenTarget, DomainError};
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// `convert` was called without a completion callback.
    #[error("{target} converter: callback is not a valid function")]
    InvalidCallback {
        /// Target of the converter that was called
        target: CodegenTarget,
    },
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
