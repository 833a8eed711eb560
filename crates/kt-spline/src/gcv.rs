//! Natural cubic smoothing spline with GCV-selected regularization.
//!
//! Uses the Reinsch formulation: with `Q` the second-difference matrix and
//! `R` the tridiagonal overlap matrix of the knot spacing, the interior
//! second derivatives solve `(R + lambda QᵀQ) gamma = Qᵀy` and the fitted
//! knot values are `f = y - lambda Q gamma`. The smoothing weight `lambda`
//! trades fidelity to the samples against curvature; it is selected by
//! minimizing the generalized cross-validation score
//! `GCV(lambda) = n * RSS / tr(I - H)^2` over a log-spaced candidate grid.

use crate::error::{SplineError, SplineResult};
use kt_core::Real;
use nalgebra::{DMatrix, DVector};

/// Candidate grid for the GCV search over the smoothing weight.
#[derive(Clone, Copy, Debug)]
pub struct GcvConfig {
    /// Smallest candidate lambda (near-interpolating).
    pub lambda_min: Real,
    /// Largest candidate lambda (near-linear fit).
    pub lambda_max: Real,
    /// Number of log-spaced candidates.
    pub candidates: usize,
}

impl Default for GcvConfig {
    fn default() -> Self {
        Self {
            lambda_min: 1e-6,
            lambda_max: 1e6,
            candidates: 31,
        }
    }
}

/// A fitted natural cubic smoothing spline in one variable.
///
/// Evaluable for value and first derivative at arbitrary time; queries
/// outside the knot range extrapolate linearly (the natural boundary
/// conditions make the spline's curvature vanish at the ends).
#[derive(Clone, Debug)]
pub struct SmoothingSpline {
    x: Vec<Real>,
    a: Vec<Real>,
    m: Vec<Real>,
    lambda: Real,
}

impl SmoothingSpline {
    /// Fit a smoothing spline to `(x, y)` samples with the default GCV grid.
    ///
    /// # Errors
    ///
    /// Fails on fewer than four samples, mismatched array lengths,
    /// non-strictly-increasing times, or non-finite input. These are caller
    /// errors and are never handled internally.
    ///
    /// # Example
    ///
    /// ```
    /// use kt_spline::SmoothingSpline;
    ///
    /// let times: Vec<f64> = (0..20).map(|i| i as f64 * 0.1).collect();
    /// let values: Vec<f64> = times.iter().map(|t| 2.0 * t + 1.0).collect();
    /// let spline = SmoothingSpline::fit(&times, &values).unwrap();
    ///
    /// // A straight line survives smoothing unchanged.
    /// assert!((spline.evaluate(0.95) - 2.9).abs() < 1e-8);
    /// assert!((spline.evaluate_derivative(0.95) - 2.0).abs() < 1e-8);
    /// ```
    pub fn fit(x: &[Real], y: &[Real]) -> SplineResult<Self> {
        Self::fit_with(x, y, GcvConfig::default())
    }

    /// Fit with an explicit GCV candidate grid.
    pub fn fit_with(x: &[Real], y: &[Real], config: GcvConfig) -> SplineResult<Self> {
        let n = x.len();
        if y.len() != n {
            return Err(SplineError::LengthMismatch {
                what: "time and value arrays must have equal length",
            });
        }
        if n < 4 {
            return Err(SplineError::TooFewSamples { n });
        }
        for (i, w) in x.windows(2).enumerate() {
            if !(w[1] > w[0]) {
                return Err(SplineError::TimesNotIncreasing { index: i + 1 });
            }
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite { what: "sample times" });
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite {
                what: "sample values",
            });
        }

        let h: Vec<Real> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let k = n - 2;

        // Reinsch system matrices. Column j corresponds to interior knot j+1.
        let mut q = DMatrix::<Real>::zeros(n, k);
        let mut r = DMatrix::<Real>::zeros(k, k);
        for j in 0..k {
            q[(j, j)] = 1.0 / h[j];
            q[(j + 1, j)] = -1.0 / h[j] - 1.0 / h[j + 1];
            q[(j + 2, j)] = 1.0 / h[j + 1];

            r[(j, j)] = (h[j] + h[j + 1]) / 3.0;
            if j + 1 < k {
                r[(j, j + 1)] = h[j + 1] / 6.0;
                r[(j + 1, j)] = h[j + 1] / 6.0;
            }
        }

        let yv = DVector::from_column_slice(y);
        let qty = q.transpose() * &yv;
        let qtq = q.transpose() * &q;

        let mut best: Option<(Real, Real)> = None; // (score, lambda)
        for i in 0..config.candidates.max(1) {
            let frac = if config.candidates > 1 {
                i as Real / (config.candidates - 1) as Real
            } else {
                0.0
            };
            let lambda = config.lambda_min * (config.lambda_max / config.lambda_min).powf(frac);
            if let Some(score) = gcv_score(&q, &r, &qtq, &qty, n, lambda)
                && best.is_none_or(|(s, _)| score < s)
            {
                best = Some((score, lambda));
            }
        }
        let (_, lambda) = best.ok_or_else(|| SplineError::Numeric {
            what: "GCV search found no solvable candidate".to_string(),
        })?;

        // Final solve at the selected lambda.
        let sys = &r + lambda * &qtq;
        let gamma = sys.lu().solve(&qty).ok_or_else(|| SplineError::Numeric {
            what: "singular smoothing system at selected lambda".to_string(),
        })?;
        let f = &yv - lambda * (&q * &gamma);

        let mut m = vec![0.0; n];
        m[1..(n - 1)].copy_from_slice(gamma.as_slice());

        Ok(Self {
            x: x.to_vec(),
            a: f.as_slice().to_vec(),
            m,
            lambda,
        })
    }

    /// The GCV-selected smoothing weight.
    pub fn lambda(&self) -> Real {
        self.lambda
    }

    /// Knot range covered by the samples.
    pub fn domain(&self) -> (Real, Real) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Spline value at `t`.
    pub fn evaluate(&self, t: Real) -> Real {
        let n = self.x.len();
        if t <= self.x[0] {
            return self.a[0] + self.derivative_in_segment(0, self.x[0]) * (t - self.x[0]);
        }
        if t >= self.x[n - 1] {
            let d = self.derivative_in_segment(n - 2, self.x[n - 1]);
            return self.a[n - 1] + d * (t - self.x[n - 1]);
        }
        self.value_in_segment(self.segment(t), t)
    }

    /// First derivative at `t` (constant outside the knot range).
    pub fn evaluate_derivative(&self, t: Real) -> Real {
        let n = self.x.len();
        if t <= self.x[0] {
            return self.derivative_in_segment(0, self.x[0]);
        }
        if t >= self.x[n - 1] {
            return self.derivative_in_segment(n - 2, self.x[n - 1]);
        }
        self.derivative_in_segment(self.segment(t), t)
    }

    fn segment(&self, t: Real) -> usize {
        let idx = self.x.partition_point(|&xi| xi <= t);
        idx.saturating_sub(1).min(self.x.len() - 2)
    }

    fn value_in_segment(&self, i: usize, t: Real) -> Real {
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - t) / h;
        let b = (t - self.x[i]) / h;
        a * self.a[i]
            + b * self.a[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0
    }

    fn derivative_in_segment(&self, i: usize, t: Real) -> Real {
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - t) / h;
        let b = (t - self.x[i]) / h;
        (self.a[i + 1] - self.a[i]) / h
            - (3.0 * a * a - 1.0) * h * self.m[i] / 6.0
            + (3.0 * b * b - 1.0) * h * self.m[i + 1] / 6.0
    }
}

/// GCV score for one lambda candidate, or None if the system is singular.
///
/// `tr(I - H) = lambda * tr((R + lambda QᵀQ)^-1 QᵀQ)` is the residual
/// effective degrees of freedom; `RSS = ||lambda Q gamma||^2`.
fn gcv_score(
    q: &DMatrix<Real>,
    r: &DMatrix<Real>,
    qtq: &DMatrix<Real>,
    qty: &DVector<Real>,
    n: usize,
    lambda: Real,
) -> Option<Real> {
    let sys = r + lambda * qtq;
    let lu = sys.lu();
    let gamma = lu.solve(qty)?;
    let resid = lambda * (q * &gamma);
    let rss = resid.norm_squared();
    let dof = lambda * lu.solve(qtq)?.trace();
    let score = n as Real * rss / (dof * dof);
    score.is_finite().then_some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kt_core::{Tolerances, nearly_equal};

    fn grid(n: usize, t_end: Real) -> Vec<Real> {
        (0..n).map(|i| t_end * i as Real / (n - 1) as Real).collect()
    }

    #[test]
    fn reproduces_straight_line() {
        let x = grid(30, 3.0);
        let y: Vec<Real> = x.iter().map(|t| 2.0 * t - 1.0).collect();
        let spline = SmoothingSpline::fit(&x, &y).unwrap();

        let tol = Tolerances::new(1e-8, 0.0);
        for &t in &[0.0, 0.37, 1.5, 2.9, 3.0] {
            assert!(nearly_equal(spline.evaluate(t), 2.0 * t - 1.0, tol));
            assert!(nearly_equal(spline.evaluate_derivative(t), 2.0, tol));
        }
    }

    #[test]
    fn smooths_noisy_sine() {
        let x = grid(80, std::f64::consts::TAU);
        // Deterministic pseudo-noise, amplitude 0.05.
        let y: Vec<Real> = x
            .iter()
            .enumerate()
            .map(|(i, t)| t.sin() + 0.05 * (i as Real * 12.9898).sin())
            .collect();
        let spline = SmoothingSpline::fit(&x, &y).unwrap();

        let mut max_err: Real = 0.0;
        let mut max_deriv_err: Real = 0.0;
        for i in 0..200 {
            let t = std::f64::consts::TAU * i as Real / 199.0;
            max_err = max_err.max((spline.evaluate(t) - t.sin()).abs());
            max_deriv_err = max_deriv_err.max((spline.evaluate_derivative(t) - t.cos()).abs());
        }
        assert!(max_err < 0.15, "max value error {max_err}");
        assert!(max_deriv_err < 0.6, "max derivative error {max_deriv_err}");

        // The selected weight comes from the default candidate grid.
        let lambda = spline.lambda();
        assert!((1e-6..=1e6).contains(&lambda), "lambda {lambda}");
    }

    #[test]
    fn extrapolates_linearly() {
        let x = grid(20, 2.0);
        let y: Vec<Real> = x.iter().map(|t| 3.0 * t).collect();
        let spline = SmoothingSpline::fit(&x, &y).unwrap();

        // Outside the domain the derivative is held constant.
        assert!((spline.evaluate(-1.0) - (-3.0)).abs() < 1e-8);
        assert!((spline.evaluate(4.0) - 12.0).abs() < 1e-8);
        assert!((spline.evaluate_derivative(-1.0) - 3.0).abs() < 1e-8);
    }

    #[test]
    fn rejects_degenerate_input() {
        let err = SmoothingSpline::fit(&[0.0], &[1.0]).unwrap_err();
        assert!(matches!(err, SplineError::TooFewSamples { n: 1 }));

        let err = SmoothingSpline::fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, SplineError::TooFewSamples { n: 3 }));

        let err =
            SmoothingSpline::fit(&[0.0, 1.0, 1.0, 2.0], &[0.0, 1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SplineError::TimesNotIncreasing { index: 2 }));

        let err = SmoothingSpline::fit(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, SplineError::LengthMismatch { .. }));

        let err =
            SmoothingSpline::fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, Real::NAN, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, SplineError::NonFinite { .. }));
    }

    #[test]
    fn domain_reports_knot_range() {
        let x = grid(10, 1.0);
        let y: Vec<Real> = x.iter().map(|t| *t).collect();
        let spline = SmoothingSpline::fit(&x, &y).unwrap();
        let (lo, hi) = spline.domain();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
    }
}
