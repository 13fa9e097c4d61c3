//! Error types for podgrid core.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating workload addressing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid request: namespace parameter required")]
    MissingNamespace,

    #[error("invalid request: name parameter required")]
    MissingName,
}
