//! Shared error type for core numeric checks.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the numeric foundations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A scalar that must be finite is NaN or infinite.
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
