//! The working float type, comparison tolerances, and finiteness checks.

use crate::error::{CoreError, CoreResult};

/// Floating point type for all kinematic quantities.
pub type Real = f64;

/// Paired absolute/relative tolerance for float comparisons.
///
/// The absolute bound handles values near zero, the relative bound scales
/// with the larger magnitude.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }

    /// Looser pair for quantities that passed through a smoothing fit or
    /// a few thousand integration steps.
    pub const FITTED: Self = Self::new(1e-6, 1e-6);

    /// True when `a` and `b` agree within this tolerance pair.
    pub fn close(self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

/// [`Tolerances::close`] as a free function, for test assertions.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    tol.close(a, b)
}

/// Pass a finite scalar through, or name the offender in the error.
pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}
