//! First-person camera.
//!
//! The camera stores its position and three Euler angles. Two rotation
//! matrices are derived from the angles and cached: the full rotation used
//! to turn viewport directions into world directions, and a yaw-only
//! rotation used for walking so that looking up or down never changes how
//! fast the camera moves across the ground.

use std::f64::consts::PI;

use glint_math::{euler_rotation, multiply_mv, wrap_angle, yaw_rotation, Mat3, Vec3};

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,

    // Euler angles, each kept in [0, 2pi)
    x_rot: f64, // pitch
    y_rot: f64, // yaw
    z_rot: f64, // roll

    // Cached computed values (rebuilt whenever an angle changes)
    rotation: Mat3,
    horizontal_rotation: Mat3,
}

impl Camera {
    /// Create a camera at `position` looking down +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            x_rot: 0.0,
            y_rot: 0.0,
            z_rot: 0.0,
            rotation: Mat3::IDENTITY,
            horizontal_rotation: Mat3::IDENTITY,
        }
    }

    /// Set orientation (builder style).
    pub fn with_rotation(mut self, pitch: f64, yaw: f64, roll: f64) -> Self {
        self.set_rotation(pitch, yaw, roll);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn pitch(&self) -> f64 {
        self.x_rot
    }

    pub fn yaw(&self) -> f64 {
        self.y_rot
    }

    pub fn roll(&self) -> f64 {
        self.z_rot
    }

    /// Full rotation `Rz(roll) * Ry(yaw) * Rx(pitch)`.
    pub fn rotation(&self) -> &Mat3 {
        &self.rotation
    }

    /// Yaw-only rotation used for walking.
    pub fn horizontal_rotation(&self) -> &Mat3 {
        &self.horizontal_rotation
    }

    /// Replace all three angles. Angles are wrapped into `[0, 2pi)`.
    pub fn set_rotation(&mut self, pitch: f64, yaw: f64, roll: f64) {
        let (pitch, yaw, roll) = (wrap_angle(pitch), wrap_angle(yaw), wrap_angle(roll));
        if (pitch, yaw, roll) == (self.x_rot, self.y_rot, self.z_rot) {
            return;
        }
        self.x_rot = pitch;
        self.y_rot = yaw;
        self.z_rot = roll;
        self.rebuild_rotation();
    }

    /// Add to the current angles.
    pub fn rotate(&mut self, d_pitch: f64, d_yaw: f64, d_roll: f64) {
        self.set_rotation(self.x_rot + d_pitch, self.y_rot + d_yaw, self.z_rot + d_roll);
    }

    /// Turn around: yaw plus pi.
    pub fn flip_yaw(&mut self) {
        self.rotate(0.0, PI, 0.0);
    }

    /// Zero all three angles.
    pub fn reset_rotation(&mut self) {
        self.set_rotation(0.0, 0.0, 0.0);
    }

    /// Back to the origin with no rotation.
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.reset_rotation();
    }

    /// Rotate a camera-space direction into world space.
    #[inline]
    pub fn world_direction(&self, v: Vec3) -> Vec3 {
        multiply_mv(&self.rotation, v)
    }

    /// The camera's right and forward axes projected onto the ground plane.
    pub fn walk_basis(&self) -> (Vec3, Vec3) {
        (
            multiply_mv(&self.horizontal_rotation, Vec3::X),
            multiply_mv(&self.horizontal_rotation, Vec3::Z),
        )
    }

    fn rebuild_rotation(&mut self) {
        self.rotation = euler_rotation(self.z_rot, self.y_rot, self.x_rot);
        self.horizontal_rotation = yaw_rotation(self.y_rot);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
