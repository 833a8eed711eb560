//! kt-core: stable foundation for kinetrack.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - vec3 (3-component kinematic vectors, nalgebra-backed)
//! - ids (stable compact IDs for bodies)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod vec3;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use vec3::*;
