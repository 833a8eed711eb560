//! Ordered time series with boundary padding.

use crate::error::{SeriesError, SeriesResult};
use kt_core::{Real, Vec3};
use serde::{Deserialize, Serialize};

/// A single time-stamped sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample<V> {
    /// Sample time (seconds).
    pub t: Real,
    /// Sampled value.
    pub value: V,
}

/// Append-only time series with non-decreasing times.
///
/// Generic over the sample value so the same container holds 3-vector
/// kinematics (`Series<Vec3>`) and whole-system generalized coordinate
/// vectors (`Series<DVector<Real>>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<V> {
    samples: Vec<Sample<V>>,
}

impl<V> Default for Series<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Series<V> {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at index `i`, if present.
    pub fn get(&self, i: usize) -> Option<&Sample<V>> {
        self.samples.get(i)
    }

    /// First sample, if any.
    pub fn first(&self) -> Option<&Sample<V>> {
        self.samples.first()
    }

    /// Last sample, if any.
    pub fn last(&self) -> Option<&Sample<V>> {
        self.samples.last()
    }

    /// Iterate over samples in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample<V>> {
        self.samples.iter()
    }

    /// All sample times in order.
    pub fn times(&self) -> Vec<Real> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// Append a sample, enforcing non-decreasing time.
    pub fn append(&mut self, t: Real, value: V) -> SeriesResult<()> {
        if let Some(last) = self.samples.last()
            && t < last.t
        {
            return Err(SeriesError::TimeOrder { t, last: last.t });
        }
        self.samples.push(Sample { t, value });
        Ok(())
    }
}

/// Boundary pad length for a series of `count` samples before spline
/// fitting: a quarter of the series, capped at 100 samples per side.
pub fn pad_len(count: usize) -> usize {
    (count / 4).min(100)
}

impl Series<Vec3> {
    /// Times as a column, for handing to a spline fitter.
    pub fn time_column(&self) -> Vec<Real> {
        self.times()
    }

    /// One vector component (0=x, 1=y, 2=z) as a column.
    pub fn component_column(&self, index: usize) -> SeriesResult<Vec<Real>> {
        if index >= 3 {
            return Err(SeriesError::ComponentOob { index });
        }
        Ok(self.samples.iter().map(|s| s.value[index]).collect())
    }

    /// Pad both ends with `n` samples reflected about the boundary.
    ///
    /// Each padded sample is the point-reflection of an interior sample
    /// through the first (resp. last) sample, in both time and value:
    /// `(2*t0 - t_i, 2*v0 - v_i)`. Reflection extends a straight-line
    /// series exactly and keeps times strictly increasing, which the
    /// smoothing fit requires; it exists to give the fit stable neighbor
    /// context at the edges. `n` is clamped to `len - 1`.
    pub fn pad(&mut self, n: usize) {
        if self.samples.len() < 2 || n == 0 {
            return;
        }
        let n = n.min(self.samples.len() - 1);

        let head = self.samples[0].clone();
        let tail = self.samples[self.samples.len() - 1].clone();

        let mut padded = Vec::with_capacity(self.samples.len() + 2 * n);
        for i in (1..=n).rev() {
            let s = &self.samples[i];
            padded.push(Sample {
                t: 2.0 * head.t - s.t,
                value: 2.0 * head.value - s.value,
            });
        }
        padded.extend(self.samples.iter().cloned());
        let last = self.samples.len() - 1;
        for i in 1..=n {
            let s = &self.samples[last - i];
            padded.push(Sample {
                t: 2.0 * tail.t - s.t,
                value: 2.0 * tail.value - s.value,
            });
        }
        self.samples = padded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kt_core::vec3;
    use proptest::prelude::*;

    fn linear_series(n: usize) -> Series<Vec3> {
        let mut s = Series::new();
        for i in 0..n {
            let t = i as Real * 0.1;
            s.append(t, vec3(2.0 * t, -t, 0.0)).unwrap();
        }
        s
    }

    #[test]
    fn append_enforces_time_order() {
        let mut s = Series::new();
        s.append(0.0, vec3(0.0, 0.0, 0.0)).unwrap();
        s.append(0.0, vec3(1.0, 0.0, 0.0)).unwrap(); // ties allowed
        s.append(1.0, vec3(2.0, 0.0, 0.0)).unwrap();
        let err = s.append(0.5, vec3(3.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, SeriesError::TimeOrder { .. }));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn pad_len_formula() {
        assert_eq!(pad_len(40), 10);
        assert_eq!(pad_len(1000), 100);
        assert_eq!(pad_len(3), 0);
        assert_eq!(pad_len(400), 100);
        assert_eq!(pad_len(401), 100);
    }

    #[test]
    fn pad_extends_lines_exactly() {
        let mut s = linear_series(20);
        s.pad(5);
        assert_eq!(s.len(), 30);
        for sample in s.iter() {
            assert!((sample.value.x - 2.0 * sample.t).abs() < 1e-12);
            assert!((sample.value.y + sample.t).abs() < 1e-12);
        }
    }

    #[test]
    fn pad_keeps_times_strictly_increasing() {
        let mut s = linear_series(12);
        s.pad(3);
        let t = s.times();
        for w in t.windows(2) {
            assert!(w[1] > w[0]);
        }
        // Boundaries extended symmetrically
        assert!((t[0] - (-0.3)).abs() < 1e-12);
        assert!((t[t.len() - 1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn pad_clamps_to_available_samples() {
        let mut s = linear_series(4);
        s.pad(10);
        assert_eq!(s.len(), 4 + 2 * 3);
    }

    #[test]
    fn component_columns() {
        let s = linear_series(5);
        let x = s.component_column(0).unwrap();
        let y = s.component_column(1).unwrap();
        assert_eq!(x.len(), 5);
        assert!((x[4] - 0.8).abs() < 1e-12);
        assert!((y[4] + 0.4).abs() < 1e-12);
        assert!(s.component_column(3).is_err());
    }

    proptest! {
        #[test]
        fn pad_len_bounded(count in 0usize..100_000) {
            let n = pad_len(count);
            prop_assert!(n <= 100);
            prop_assert!(n <= count / 4);
        }

        #[test]
        fn pad_preserves_interior(n in 2usize..50, pad in 0usize..120) {
            let original = linear_series(n);
            let mut padded = original.clone();
            padded.pad(pad);
            let added = pad.min(n - 1);
            prop_assert_eq!(padded.len(), n + 2 * added);
            for i in 0..n {
                prop_assert_eq!(padded.get(added + i).unwrap(), original.get(i).unwrap());
            }
        }
    }
}
