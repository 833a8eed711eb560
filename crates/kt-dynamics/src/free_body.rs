//! Minimal translating-body engine for tests and demos.

use crate::engine::{Configuration, DynamicsEngine};
use kt_core::{BodyId, Real, Vec3, vec3, vec3_zero};
use nalgebra::DVector;

/// A force application recorded by [`FreeBodyEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedForce {
    pub body: BodyId,
    pub local_point: Vec3,
    pub force: Vec3,
}

/// A single rigid body translating without rotation.
///
/// The configuration is `q = [x, y, z]` of the body origin and
/// `u = [vx, vy, vz]`; a local point maps to `q + local` with velocity `u`.
/// Every applied force is recorded so tests can assert on exactly what the
/// actuator delivered.
#[derive(Clone, Debug, Default)]
pub struct FreeBodyEngine {
    origin: Vec3,
    velocity: Vec3,
    applied: Vec<AppliedForce>,
}

impl FreeBodyEngine {
    /// Create an engine with the body at the global origin, at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the body directly, bypassing a full configuration install.
    pub fn place(&mut self, origin: Vec3, velocity: Vec3) {
        self.origin = origin;
        self.velocity = velocity;
    }

    /// Current body origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Current body velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// All forces applied so far, in application order.
    pub fn applied_forces(&self) -> &[AppliedForce] {
        &self.applied
    }

    /// Net force accumulated on the body since the last clear.
    pub fn net_force(&self) -> Vec3 {
        self.applied
            .iter()
            .fold(vec3_zero(), |acc, a| acc + a.force)
    }

    /// Forget recorded force applications.
    pub fn clear_applied(&mut self) {
        self.applied.clear();
    }

    /// The configuration corresponding to the current placement.
    pub fn configuration(&self) -> Configuration {
        Configuration::new(
            DVector::from_column_slice(self.origin.as_slice()),
            DVector::from_column_slice(self.velocity.as_slice()),
        )
    }
}

impl DynamicsEngine for FreeBodyEngine {
    fn set_configuration(&mut self, config: &Configuration) {
        debug_assert!(config.q.len() >= 3 && config.u.len() >= 3);
        self.origin = vec3(config.q[0], config.q[1], config.q[2]);
        self.velocity = vec3(config.u[0], config.u[1], config.u[2]);
    }

    fn global_position(&self, _body: BodyId, local_point: &Vec3) -> Vec3 {
        self.origin + local_point
    }

    fn global_velocity(&self, _body: BodyId, _local_point: &Vec3) -> Vec3 {
        self.velocity
    }

    fn apply_point_force(&mut self, body: BodyId, local_point: &Vec3, force: &Vec3) {
        self.applied.push(AppliedForce {
            body,
            local_point: *local_point,
            force: *force,
        });
    }
}

/// Advance a free body one explicit-Euler step under its net recorded force.
///
/// Convenience for closed-loop demos; real integration lives with the caller.
pub fn euler_step(engine: &mut FreeBodyEngine, mass: Real, dt: Real) {
    let accel = engine.net_force() / mass;
    let velocity = engine.velocity() + accel * dt;
    let origin = engine.origin() + velocity * dt;
    engine.place(origin, velocity);
    engine.clear_applied();
}

#[cfg(test)]
mod tests {
    use super::*;
    use kt_core::Id;

    #[test]
    fn global_kinematics_follow_configuration() {
        let mut engine = FreeBodyEngine::new();
        let config = Configuration::new(
            DVector::from_column_slice(&[1.0, 2.0, 3.0]),
            DVector::from_column_slice(&[0.1, 0.0, -0.1]),
        );
        engine.set_configuration(&config);

        let body = Id::from_index(0);
        let local = vec3(0.5, 0.0, 0.0);
        assert_eq!(engine.global_position(body, &local), vec3(1.5, 2.0, 3.0));
        assert_eq!(engine.global_velocity(body, &local), vec3(0.1, 0.0, -0.1));
    }

    #[test]
    fn records_applied_forces() {
        let mut engine = FreeBodyEngine::new();
        let body = Id::from_index(0);
        engine.apply_point_force(body, &vec3_zero(), &vec3(1.0, 0.0, 0.0));
        engine.apply_point_force(body, &vec3_zero(), &vec3(0.0, 2.0, 0.0));

        assert_eq!(engine.applied_forces().len(), 2);
        assert_eq!(engine.net_force(), vec3(1.0, 2.0, 0.0));

        engine.clear_applied();
        assert!(engine.applied_forces().is_empty());
    }

    #[test]
    fn euler_step_moves_body() {
        let mut engine = FreeBodyEngine::new();
        let body = Id::from_index(0);
        engine.apply_point_force(body, &vec3_zero(), &vec3(2.0, 0.0, 0.0));
        euler_step(&mut engine, 1.0, 0.5);

        assert_eq!(engine.velocity(), vec3(1.0, 0.0, 0.0));
        assert_eq!(engine.origin(), vec3(0.5, 0.0, 0.0));
        assert!(engine.applied_forces().is_empty());
    }
}
