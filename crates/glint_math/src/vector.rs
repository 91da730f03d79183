//! Free-standing vector helpers.
//!
//! glam already covers dot, add, sub and scale. The functions here pin down
//! the exact formulas the shading code relies on, so they stay independent of
//! glam's own conventions (its `reflect`, for example, mirrors the other way).

use crate::{Mat3, Vec3};

/// Euclidean length, `sqrt(v . v)`.
#[inline]
pub fn magnitude(v: Vec3) -> f64 {
    v.dot(v).sqrt()
}

/// Divide a vector by its magnitude.
///
/// A zero vector yields non-finite components; callers that can see one
/// must check first.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v / magnitude(v)
}

/// Mirror `ray` about `normal`: `2 (n . ray) n - ray`.
///
/// Both the light vector in the specular term and the view vector in the
/// reflection step go through this; the result points away from the surface
/// when `ray` does.
#[inline]
pub fn reflect(ray: Vec3, normal: Vec3) -> Vec3 {
    2.0 * normal.dot(ray) * normal - ray
}

/// 3x3 matrix times column vector.
#[inline]
pub fn multiply_mv(m: &Mat3, v: Vec3) -> Vec3 {
    *m * v
}
