//! Error types for spline fitting.

use thiserror::Error;

/// Result type for spline operations.
pub type SplineResult<T> = Result<T, SplineError>;

/// Errors that can occur while fitting a smoothing spline.
#[derive(Debug, Error)]
pub enum SplineError {
    /// The fit is underdetermined: a cubic smoothing spline needs at least
    /// four samples.
    #[error("Too few samples for smoothing fit: got {n}, need at least 4")]
    TooFewSamples { n: usize },

    /// Time and value arrays must have equal lengths.
    #[error("Array length mismatch: {what}")]
    LengthMismatch { what: &'static str },

    /// Sample times must be strictly increasing.
    #[error("Sample times not strictly increasing at index {index}")]
    TimesNotIncreasing { index: usize },

    /// A non-finite value was passed to the fitter.
    #[error("Non-finite input for {what}")]
    NonFinite { what: &'static str },

    /// Linear algebra failure inside the fit.
    #[error("Numeric failure: {what}")]
    Numeric { what: String },
}
