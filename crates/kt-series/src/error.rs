//! Error types for time-series storage.

use thiserror::Error;

/// Result type for series operations.
pub type SeriesResult<T> = Result<T, SeriesError>;

/// Errors that can occur in time-series operations.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Appended sample would break the non-decreasing time invariant.
    #[error("Time order violated: t={t} is before last recorded time {last}")]
    TimeOrder { t: f64, last: f64 },

    /// Operation requires a non-empty series.
    #[error("Series is empty: {what}")]
    Empty { what: &'static str },

    /// Component index out of range for a vector series.
    #[error("Component index out of range: {index} (vector has 3 components)")]
    ComponentOob { index: usize },

    /// Filesystem error while persisting or loading a series.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while persisting or loading a series.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
