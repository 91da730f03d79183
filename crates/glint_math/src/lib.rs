//! Glint math - f64 vector, matrix and ray types for the sphere tracer.
//!
//! Vectors and matrices are glam's double-precision types; this crate adds
//! the handful of operations the tracer needs on top of them.

pub use glam::{DMat3, DVec3, EulerRot};

mod interval;
mod ray;
mod rotation;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use rotation::{euler_rotation, wrap_angle, yaw_rotation};
pub use vector::{magnitude, multiply_mv, normalize, reflect};

/// Double-precision 3-vector used throughout the tracer.
pub type Vec3 = DVec3;

/// Row-major semantics, column-major storage (glam).
pub type Mat3 = DMat3;
