//! Error types for tracking-spring operations.
//!
//! Per-step configuration problems are not errors: the control law warns
//! and degrades instead of aborting a running simulation. Errors here come
//! from the batch fitting path, where a silently wrong fit would be worse
//! than a stopped run.

use kt_core::CoreError;
use kt_series::SeriesError;
use kt_spline::SplineError;
use thiserror::Error;

/// Result type for tracking-spring operations.
pub type SpringResult<T> = Result<T, SpringError>;

/// Errors that can occur configuring or fitting a tracking spring.
#[derive(Debug, Error)]
pub enum SpringError {
    /// Invalid parameter value.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The batch fit needs a bound local attachment-point function.
    #[error("No local attachment-point function is bound")]
    MissingPointFunction,

    /// Coordinate and speed histories disagree.
    #[error("History mismatch: {what}")]
    HistoryMismatch { what: &'static str },

    /// A scalar parameter failed a core numeric check.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Spline fitting failed; propagated unmodified from the fitter.
    #[error(transparent)]
    Spline(#[from] SplineError),

    /// Time-series bookkeeping failed during the batch pass.
    #[error(transparent)]
    Series(#[from] SeriesError),
}
