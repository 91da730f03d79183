// Rotation builders for the first-person camera.
//
// Angles follow the camera's naming: roll (alpha) about Z, yaw (beta) about Y,
// pitch (gamma) about X. The full matrix is the intrinsic Z-Y-X product.

use std::f64::consts::TAU;

use crate::{Mat3, Vec3};

/// Build `Rz(roll) * Ry(yaw) * Rx(pitch)`.
///
/// Row-major this is:
///
/// ```text
/// [ ca*cb   ca*sb*sg - sa*cg   ca*sb*cg + sa*sg ]
/// [ sa*cb   sa*sb*sg + ca*cg   sa*sb*cg - ca*sg ]
/// [ -sb     cb*sg              cb*cg            ]
/// ```
pub fn euler_rotation(roll: f64, yaw: f64, pitch: f64) -> Mat3 {
    let (sa, ca) = roll.sin_cos();
    let (sb, cb) = yaw.sin_cos();
    let (sg, cg) = pitch.sin_cos();

    // glam stores columns
    Mat3::from_cols(
        Vec3::new(ca * cb, sa * cb, -sb),
        Vec3::new(ca * sb * sg - sa * cg, sa * sb * sg + ca * cg, cb * sg),
        Vec3::new(ca * sb * cg + sa * sg, sa * sb * cg - ca * sg, cb * cg),
    )
}

/// Yaw-only rotation about Y. The Y row is the identity, so anything rotated
/// by it keeps its height.
pub fn yaw_rotation(yaw: f64) -> Mat3 {
    let (sb, cb) = yaw.sin_cos();
    Mat3::from_cols(
        Vec3::new(cb, 0.0, -sb),
        Vec3::Y,
        Vec3::new(sb, 0.0, cb),
    )
}

/// Wrap an angle into `[0, 2pi)`.
///
/// Negative angles and angles several turns out are both handled. Non-finite
/// input collapses to zero so a bad mouse delta cannot poison the camera.
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
