//! Dynamics-engine interface.

use kt_core::{BodyId, Real, Vec3};
use nalgebra::DVector;

/// A full generalized-coordinate configuration of the simulated system.
///
/// Owned, explicit state: the smoother installs configurations one sample at
/// a time while scanning history, and the surrounding integrator installs
/// the current one before each force call. Nothing here is global.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Generalized coordinates (radians for angular coordinates).
    pub q: DVector<Real>,
    /// Generalized speeds.
    pub u: DVector<Real>,
}

impl Configuration {
    /// Create a configuration from coordinate and speed vectors.
    pub fn new(q: DVector<Real>, u: DVector<Real>) -> Self {
        Self { q, u }
    }
}

/// The dynamics-engine operations the tracking spring consumes.
///
/// Kinematics queries are answered under whatever configuration was last
/// installed; the trait carries no notion of time.
pub trait DynamicsEngine {
    /// Install a configuration; subsequent queries are answered under it.
    fn set_configuration(&mut self, config: &Configuration);

    /// Global position of a point given in a body's local frame.
    fn global_position(&self, body: BodyId, local_point: &Vec3) -> Vec3;

    /// Global velocity of a material point given in a body's local frame.
    fn global_velocity(&self, body: BodyId, local_point: &Vec3) -> Vec3;

    /// Apply a global-frame force at a body-local point.
    fn apply_point_force(&mut self, body: BodyId, local_point: &Vec3, force: &Vec3);
}
