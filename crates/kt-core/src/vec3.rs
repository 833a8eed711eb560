//! 3-component kinematic vectors.
//!
//! Positions, velocities, forces, and per-axis gain triples are all plain
//! `nalgebra::Vector3<Real>` values with named `.x/.y/.z` accessors. Bulk
//! get/set goes through `as_slice`/`from_column_slice` on the nalgebra side.

use crate::Real;

pub use nalgebra::Vector3;

/// The kinematic 3-vector used for positions, velocities, and forces.
pub type Vec3 = Vector3<Real>;

/// Shorthand constructor.
pub fn vec3(x: Real, y: Real, z: Real) -> Vec3 {
    Vector3::new(x, y, z)
}

/// The zero vector.
pub fn vec3_zero() -> Vec3 {
    Vector3::zeros()
}
