//! kt-spring: point-to-point tracking spring actuation.
//!
//! Two components, consumed by a simulation loop that owns the dynamics
//! engine:
//!
//! - [`smoother`]: batch-fits smoothing splines to the recorded global
//!   position and velocity of a tracked body point, producing continuous
//!   target functions of time.
//! - [`actuator`]: the per-timestep control law. Compares current global
//!   kinematics of the attachment point against the target functions,
//!   computes a per-axis PD force, gates it by activation window and force
//!   magnitude, and delivers it to the dynamics engine.
//!
//! Data flow: recorded kinematics → smoother → target functions →
//! [`TrackingSpringActuator::step`] each timestep → force to the engine
//! (+ optional applied-force log).
//!
//! Everything here is single-threaded and synchronous: smoothing is an
//! offline batch pass that repeatedly mutates the engine configuration, so
//! it must never run concurrently with a live integration on the same
//! engine instance.

pub mod actuator;
pub mod error;
pub mod smoother;

pub use actuator::{SpringParams, TrackingSpringActuator};
pub use error::{SpringError, SpringResult};
pub use smoother::fit_target_functions;
