//! kt-dynamics: the dynamics-engine seam consumed by the tracking spring.
//!
//! The actuator and smoother only ever see the [`DynamicsEngine`] trait:
//! configuration install, global kinematics queries, and point-force
//! application. A minimal translating-body implementation is provided for
//! tests and demos; a full multibody engine plugs in behind the same trait.

pub mod engine;
pub mod free_body;

pub use engine::{Configuration, DynamicsEngine};
pub use free_body::{AppliedForce, FreeBodyEngine, euler_step};
