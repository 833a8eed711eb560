//! Time-function abstractions consumed by the tracking actuator.
//!
//! Value and first derivative are two distinct operations on the function
//! object; there is no derivative-request flag.

use kt_core::{Real, Vec3, vec3_zero};

/// A scalar function of time.
pub trait ScalarFunction {
    /// Value at time `t`.
    fn evaluate(&self, t: Real) -> Real;
}

/// A 3-vector function of time, evaluable for value and first derivative.
pub trait VectorFunction {
    /// Value at time `t`.
    fn evaluate(&self, t: Real) -> Vec3;

    /// First time-derivative at time `t`.
    fn evaluate_derivative(&self, t: Real) -> Vec3;
}

/// A constant scale factor.
#[derive(Debug, Clone, Copy)]
pub struct ConstantScale(pub Real);

impl ScalarFunction for ConstantScale {
    fn evaluate(&self, _t: Real) -> Real {
        self.0
    }
}

/// Linear ramp between two values over `[t0, t1]`, held constant outside.
///
/// Useful for fading a tracking force in or out independently of the gains.
#[derive(Debug, Clone, Copy)]
pub struct LinearRamp {
    pub t0: Real,
    pub t1: Real,
    pub from: Real,
    pub to: Real,
}

impl ScalarFunction for LinearRamp {
    fn evaluate(&self, t: Real) -> Real {
        if t <= self.t0 {
            self.from
        } else if t >= self.t1 {
            self.to
        } else {
            let s = (t - self.t0) / (self.t1 - self.t0);
            self.from + s * (self.to - self.from)
        }
    }
}

/// A fixed point, constant in time. The usual shape of a local
/// attachment-point function.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPoint(pub Vec3);

impl VectorFunction for ConstantPoint {
    fn evaluate(&self, _t: Real) -> Vec3 {
        self.0
    }

    fn evaluate_derivative(&self, _t: Real) -> Vec3 {
        vec3_zero()
    }
}

/// A straight-line trajectory at constant velocity.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub origin: Vec3,
    pub velocity: Vec3,
}

impl VectorFunction for Line {
    fn evaluate(&self, t: Real) -> Vec3 {
        self.origin + t * self.velocity
    }

    fn evaluate_derivative(&self, _t: Real) -> Vec3 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kt_core::vec3;

    #[test]
    fn ramp_holds_outside_window() {
        let ramp = LinearRamp {
            t0: 1.0,
            t1: 3.0,
            from: 0.0,
            to: 1.0,
        };
        assert_eq!(ramp.evaluate(0.0), 0.0);
        assert_eq!(ramp.evaluate(5.0), 1.0);
        assert!((ramp.evaluate(2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn line_value_and_derivative() {
        let line = Line {
            origin: vec3(1.0, 0.0, 0.0),
            velocity: vec3(0.0, 2.0, 0.0),
        };
        assert_eq!(line.evaluate(1.5), vec3(1.0, 3.0, 0.0));
        assert_eq!(line.evaluate_derivative(1.5), vec3(0.0, 2.0, 0.0));
    }

    #[test]
    fn constant_point_has_zero_derivative() {
        let p = ConstantPoint(vec3(0.1, 0.2, 0.3));
        assert_eq!(p.evaluate(7.0), vec3(0.1, 0.2, 0.3));
        assert_eq!(p.evaluate_derivative(7.0), vec3(0.0, 0.0, 0.0));
    }
}
