//! kt-spline: time-function primitives and regularized smoothing-spline fits.
//!
//! Two layers:
//! - [`function`]: the `ScalarFunction`/`VectorFunction` abstractions consumed
//!   by the tracking actuator, with a few closed-form implementations
//!   (constants, lines, ramps).
//! - [`gcv`] / [`vector`]: a natural cubic smoothing spline with its
//!   regularization weight chosen by generalized cross-validation, and the
//!   3-channel vector fit built on it.

pub mod error;
pub mod function;
pub mod gcv;
pub mod vector;

pub use error::{SplineError, SplineResult};
pub use function::{ConstantPoint, ConstantScale, Line, LinearRamp, ScalarFunction, VectorFunction};
pub use gcv::{GcvConfig, SmoothingSpline};
pub use vector::GcvSplineVec3;
