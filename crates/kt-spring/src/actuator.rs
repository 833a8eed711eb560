//! The tracking spring actuator and its per-step control law.

use crate::error::{SpringError, SpringResult};
use crate::smoother::fit_target_functions;
use kt_core::{BodyId, Real, Vec3, ensure_finite, vec3_zero};
use kt_dynamics::DynamicsEngine;
use kt_series::Series;
use kt_spline::{ScalarFunction, VectorFunction};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Serializable tracking-spring parameters.
///
/// Per-axis stiffness and damping, the minimum force magnitude below which
/// nothing is applied, and the scalar pre-multiplier on the whole force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Per-axis stiffness (N/m).
    pub k: Vec3,
    /// Per-axis damping (N·s/m).
    pub b: Vec3,
    /// Force-magnitude threshold (N). Zero or negative means the force is
    /// always applied.
    pub threshold: Real,
    /// Scalar pre-multiplier on the force.
    pub scale_factor: Real,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            k: vec3_zero(),
            b: vec3_zero(),
            threshold: 0.0,
            scale_factor: 1.0,
        }
    }
}

impl SpringParams {
    fn validate(&self) -> SpringResult<()> {
        for axis in 0..3 {
            ensure_finite(self.k[axis], "stiffness")?;
            ensure_finite(self.b[axis], "damping")?;
        }
        ensure_finite(self.threshold, "threshold")?;
        ensure_finite(self.scale_factor, "scale factor")?;
        Ok(())
    }
}

/// A point-to-point tracking spring attached to one body.
///
/// Holds the local attachment-point function, the fitted target functions,
/// gains, gating parameters, and the transient force/point observables. The
/// dynamics engine is never stored; every operation that needs it takes it
/// as an explicit `&mut` parameter.
///
/// Target functions are installed wholesale and never mutated in place;
/// refitting replaces both.
///
/// # Example
///
/// ```
/// use kt_core::{Id, vec3, vec3_zero};
/// use kt_dynamics::FreeBodyEngine;
/// use kt_spline::{ConstantPoint, Line};
/// use kt_spring::TrackingSpringActuator;
///
/// let mut engine = FreeBodyEngine::new();
/// let mut spring = TrackingSpringActuator::new(Id::from_index(0));
/// spring.set_point_function(Box::new(ConstantPoint(vec3_zero())));
/// spring.set_target_position(Box::new(Line {
///     origin: vec3_zero(),
///     velocity: vec3(1.0, 0.0, 0.0),
/// }));
/// spring.set_stiffness(vec3(10.0, 10.0, 10.0));
///
/// // Body sits at the origin; the target is at (2, 0, 0) at t = 2.
/// spring.step(&mut engine, 2.0);
/// assert!((spring.force().x - 20.0).abs() < 1e-9);
/// assert_eq!(engine.applied_forces().len(), 1);
/// ```
pub struct TrackingSpringActuator {
    body: BodyId,
    point_function: Option<Box<dyn VectorFunction>>,
    target_position: Option<Box<dyn VectorFunction>>,
    target_velocity: Option<Box<dyn VectorFunction>>,
    scale_function: Option<Box<dyn ScalarFunction>>,
    k: Vec3,
    b: Vec3,
    scale_factor: Real,
    threshold: Real,
    start_time: Real,
    end_time: Real,
    enabled: bool,
    record_applied: bool,
    force: Vec3,
    point: Vec3,
    applied_force_log: Series<Vec3>,
}

impl core::fmt::Debug for TrackingSpringActuator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackingSpringActuator")
            .field("body", &self.body)
            .field("point_function", &self.point_function.as_ref().map(|_| "<fn>"))
            .field("target_position", &self.target_position.as_ref().map(|_| "<fn>"))
            .field("target_velocity", &self.target_velocity.as_ref().map(|_| "<fn>"))
            .field("scale_function", &self.scale_function.as_ref().map(|_| "<fn>"))
            .field("k", &self.k)
            .field("b", &self.b)
            .field("scale_factor", &self.scale_factor)
            .field("threshold", &self.threshold)
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("enabled", &self.enabled)
            .field("record_applied", &self.record_applied)
            .field("force", &self.force)
            .field("point", &self.point)
            .field("applied_force_log", &self.applied_force_log)
            .finish()
    }
}

impl TrackingSpringActuator {
    /// Create an actuator for `body` with zero gains, threshold 0, scale 1,
    /// an unbounded activation window, and no functions bound.
    pub fn new(body: BodyId) -> Self {
        Self {
            body,
            point_function: None,
            target_position: None,
            target_velocity: None,
            scale_function: None,
            k: vec3_zero(),
            b: vec3_zero(),
            scale_factor: 1.0,
            threshold: 0.0,
            start_time: Real::NEG_INFINITY,
            end_time: Real::INFINITY,
            enabled: true,
            record_applied: false,
            force: vec3_zero(),
            point: vec3_zero(),
            applied_force_log: Series::new(),
        }
    }

    /// Create an actuator from validated parameters.
    pub fn with_params(body: BodyId, params: &SpringParams) -> SpringResult<Self> {
        params.validate()?;
        let mut actuator = Self::new(body);
        actuator.k = params.k;
        actuator.b = params.b;
        actuator.threshold = params.threshold;
        actuator.scale_factor = params.scale_factor;
        Ok(actuator)
    }

    /// The body this spring acts on.
    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Per-axis stiffness.
    pub fn stiffness(&self) -> Vec3 {
        self.k
    }

    /// Set per-axis stiffness.
    pub fn set_stiffness(&mut self, k: Vec3) {
        self.k = k;
    }

    /// Per-axis damping.
    pub fn damping(&self) -> Vec3 {
        self.b
    }

    /// Set per-axis damping.
    pub fn set_damping(&mut self, b: Vec3) {
        self.b = b;
    }

    /// Force-magnitude threshold below which no force is applied.
    pub fn threshold(&self) -> Real {
        self.threshold
    }

    /// Set the force-magnitude threshold. Zero or negative means the force
    /// is always applied.
    pub fn set_threshold(&mut self, threshold: Real) {
        self.threshold = threshold;
    }

    /// Scalar pre-multiplier on the force. If a scale function is bound,
    /// this reflects its most recent evaluation.
    pub fn scale_factor(&self) -> Real {
        self.scale_factor
    }

    /// Set the scale factor. Overridden each step while a scale function is
    /// bound.
    pub fn set_scale_factor(&mut self, scale_factor: Real) {
        self.scale_factor = scale_factor;
    }

    /// Bind a time-varying scale function.
    pub fn set_scale_function(&mut self, f: Box<dyn ScalarFunction>) {
        self.scale_function = Some(f);
    }

    /// Remove the scale function; the stored scale factor applies again.
    pub fn clear_scale_function(&mut self) {
        self.scale_function = None;
    }

    /// Bind the local attachment-point function.
    pub fn set_point_function(&mut self, f: Box<dyn VectorFunction>) {
        self.point_function = Some(f);
    }

    /// Install a target-position function (replaces any previous one).
    pub fn set_target_position(&mut self, f: Box<dyn VectorFunction>) {
        self.target_position = Some(f);
    }

    /// Install a target-velocity function. When absent, the derivative of
    /// the target-position function is used instead.
    pub fn set_target_velocity(&mut self, f: Box<dyn VectorFunction>) {
        self.target_velocity = Some(f);
    }

    /// True if a target-position function is installed.
    pub fn has_target_position(&self) -> bool {
        self.target_position.is_some()
    }

    /// True if a target-velocity function is installed.
    pub fn has_target_velocity(&self) -> bool {
        self.target_velocity.is_some()
    }

    /// Activation window `[start, end)`.
    pub fn active_window(&self) -> (Real, Real) {
        (self.start_time, self.end_time)
    }

    /// Set the activation window `[start, end)`.
    pub fn set_active_window(&mut self, start: Real, end: Real) -> SpringResult<()> {
        if start.is_nan() || end.is_nan() || start > end {
            return Err(SpringError::InvalidArg {
                what: "activation window requires start <= end",
            });
        }
        self.start_time = start;
        self.end_time = end;
        Ok(())
    }

    /// Whether the actuator is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the actuator.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether applied forces are being logged.
    pub fn record_applied(&self) -> bool {
        self.record_applied
    }

    /// Turn applied-force logging on or off.
    pub fn set_record_applied(&mut self, record: bool) {
        self.record_applied = record;
    }

    /// The force computed by the most recent active-path [`step`] call,
    /// whether or not it passed the threshold gate.
    ///
    /// [`step`]: Self::step
    pub fn force(&self) -> Vec3 {
        self.force
    }

    /// The local attachment point from the most recent evaluation.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Applied forces recorded while logging was enabled. Only forces that
    /// passed the threshold gate appear here.
    pub fn applied_force_log(&self) -> &Series<Vec3> {
        &self.applied_force_log
    }

    /// Discard the applied-force log.
    pub fn clear_applied_force_log(&mut self) {
        self.applied_force_log = Series::new();
    }

    /// Fit target position and velocity functions from a recorded history
    /// and install them, replacing any previous pair.
    ///
    /// Requires a bound attachment-point function. Mutates the engine
    /// configuration while scanning; run it before the tracking phase, never
    /// during one.
    ///
    /// # Errors
    ///
    /// [`SpringError::MissingPointFunction`] without a point function;
    /// history validation and spline-fit failures propagate from
    /// [`fit_target_functions`].
    pub fn fit_target_from_history<E: DynamicsEngine>(
        &mut self,
        engine: &mut E,
        q_history: &Series<DVector<Real>>,
        u_history: &Series<DVector<Real>>,
    ) -> SpringResult<()> {
        let point_function = self
            .point_function
            .as_deref()
            .ok_or(SpringError::MissingPointFunction)?;
        let (position, velocity) =
            fit_target_functions(engine, self.body, point_function, q_history, u_history)?;
        self.target_position = Some(Box::new(position));
        self.target_velocity = Some(Box::new(velocity));
        Ok(())
    }

    /// The per-step control law.
    ///
    /// Assumes the engine already holds the configuration for time `t`;
    /// this call reads global kinematics and (conditionally) applies one
    /// force, but never advances or installs configuration.
    ///
    /// Guard order: disabled and out-of-window calls return silently;
    /// a missing target-position function warns, zeroes the transient
    /// force, and skips application for this call.
    pub fn step<E: DynamicsEngine>(&mut self, engine: &mut E, t: Real) {
        if !self.enabled {
            return;
        }
        if t < self.start_time || t >= self.end_time {
            return;
        }

        let local = match &self.point_function {
            Some(f) => {
                let p = f.evaluate(t);
                self.point = p;
                p
            }
            None => {
                warn!(t, "tracking spring: no attachment-point function bound, using stored point");
                self.point
            }
        };

        let (target_position, target_velocity) = match &self.target_position {
            Some(tp) => {
                let p = tp.evaluate(t);
                let v = match &self.target_velocity {
                    Some(tv) => tv.evaluate(t),
                    None => tp.evaluate_derivative(t),
                };
                (p, v)
            }
            None => {
                warn!(t, "tracking spring: no target-position function bound, skipping force");
                self.force = vec3_zero();
                return;
            }
        };

        let global_position = engine.global_position(self.body, &local);
        let global_velocity = engine.global_velocity(self.body, &local);

        if let Some(sf) = &self.scale_function {
            self.scale_factor = sf.evaluate(t);
        }

        let dx = target_position - global_position;
        let dv = target_velocity - global_velocity;
        let force = self.scale_factor * (self.k.component_mul(&dx) + self.b.component_mul(&dv));
        self.force = force;

        if force.norm() >= self.threshold {
            engine.apply_point_force(self.body, &local, &force);
            if self.record_applied
                && let Err(err) = self.applied_force_log.append(t, force)
            {
                warn!(t, "tracking spring: dropping force log entry: {err}");
            }
        }
    }
}
