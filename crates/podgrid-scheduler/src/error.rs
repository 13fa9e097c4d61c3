//! Scheduler error types.

use thiserror::Error;

/// Errors returned by task construction and the binding lifecycle.
///
/// An offer that simply does not fit is not an error; see
/// [`OfferFit`](crate::matcher::OfferFit).
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid offer for task {task_id}: {reason}")]
    InvalidOffer { task_id: String, reason: String },

    #[error("offer assignment must be idempotent with task {task_id}: bound to {bound}, offered {offered}")]
    NonIdempotentOffer {
        task_id: String,
        bound: String,
        offered: String,
    },

    #[error("task {0} is not bound to an offer")]
    NotBound(String),

    #[error("invalid pod key: {0}")]
    Key(#[from] podgrid_core::CoreError),
}

impl SchedulerError {
    /// Whether the error stems from malformed input rather than task state.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidOffer { .. } | Self::Key(_))
    }
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
