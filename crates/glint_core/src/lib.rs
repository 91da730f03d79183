//! Glint Core - scene model, camera and controls for the sphere tracer.
//!
//! This crate provides:
//!
//! - **Colour**: saturating 24-bit `Rgb` with 0x00RRGGBB packing
//! - **Scene**: spheres, directional/point lights and ambient light
//! - **Camera**: first-person camera with cached rotation matrices
//! - **Input**: per-frame input snapshot and the controller that applies it
//!
//! # Example
//!
//! ```
//! use glint_core::{Camera, Scene};
//!
//! let scene = Scene::reference();
//! let camera = Camera::default();
//! assert_eq!(scene.spheres().len(), 4);
//! assert_eq!(camera.position(), glint_math::Vec3::ZERO);
//! ```

pub mod camera;
pub mod color;
pub mod input;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use color::Rgb;
pub use input::{ControlConfig, Controller, InputState, Key};
pub use scene::{DirectionalLight, Lights, PointLight, Scene, SceneError, SceneResult, Sphere};
