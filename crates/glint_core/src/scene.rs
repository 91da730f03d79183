//! Scene types for the sphere tracer.
//!
//! A scene is an ordered list of spheres plus the light rig. Rendering only
//! ever reads it; the controller appends to it between frames.

use glint_math::Vec3;
use thiserror::Error;

use crate::color::Rgb;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("reflectivity {0} is outside [0, 1]")]
    InvalidReflectivity(f64),

    #[error("{what} has a non-finite component: {value:?}")]
    NonFinite { what: &'static str, value: Vec3 },

    #[error("light intensity {0} is not finite")]
    InvalidIntensity(f64),
}

/// Result type for scene edits.
pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Centre in world space
    pub center: Vec3,
    /// Surface colour
    pub color: Rgb,
    /// Phong exponent; `None` for a matte surface with no highlight
    pub specular: Option<u32>,
    /// Blend between local shading (0) and mirror reflection (1)
    pub reflectivity: f64,
    radius: u32,
    r_square: u64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(
        center: Vec3,
        color: Rgb,
        radius: u32,
        specular: Option<u32>,
        reflectivity: f64,
    ) -> SceneResult<Self> {
        check_finite("sphere center", center)?;
        if !(0.0..=1.0).contains(&reflectivity) {
            return Err(SceneError::InvalidReflectivity(reflectivity));
        }

        Ok(Self {
            center,
            color,
            specular,
            reflectivity,
            radius,
            r_square: square(radius),
        })
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// `radius * radius`, kept in step with the radius. Widened so every
    /// `u32` radius squares exactly.
    #[inline]
    pub fn r_square(&self) -> u64 {
        self.r_square
    }

    /// Change the radius, updating the cached square with it.
    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
        self.r_square = square(radius);
    }
}

/// Light arriving from a fixed direction, like the sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Points from the surface toward the light; need not be unit length
    pub direction: Vec3,
    pub intensity: f64,
}

/// Light emitted from a single point, like a bulb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f64,
}

/// The light rig: one ambient term and any number of directional and point lights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lights {
    ambient: f64,
    directional: Vec<DirectionalLight>,
    point: Vec<PointLight>,
}

impl Lights {
    /// An empty rig with no ambient light.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    pub fn set_ambient(&mut self, intensity: f64) -> SceneResult<()> {
        check_intensity(intensity)?;
        self.ambient = intensity;
        Ok(())
    }

    pub fn add_directional(&mut self, direction: Vec3, intensity: f64) -> SceneResult<()> {
        check_finite("light direction", direction)?;
        check_intensity(intensity)?;
        self.directional.push(DirectionalLight { direction, intensity });
        Ok(())
    }

    pub fn add_point(&mut self, position: Vec3, intensity: f64) -> SceneResult<()> {
        check_finite("light position", position)?;
        check_intensity(intensity)?;
        self.point.push(PointLight { position, intensity });
        Ok(())
    }

    pub fn directional(&self) -> &[DirectionalLight] {
        &self.directional
    }

    pub fn point(&self) -> &[PointLight] {
        &self.point
    }
}

/// Spheres plus lights plus the colour returned for rays that hit nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
    pub lights: Lights,
    pub background: Rgb,
}

impl Scene {
    /// An empty scene with a black background and no lights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere and return its index. Scene order decides ties
    /// between equally distant hits.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        color: Rgb,
        radius: u32,
        specular: Option<u32>,
        reflectivity: f64,
    ) -> SceneResult<usize> {
        let sphere = Sphere::new(center, color, radius, specular, reflectivity)?;
        let index = self.spheres.len();
        self.spheres.push(sphere);
        log::debug!("Added sphere #{} at {:?} (r={})", index, center, radius);
        Ok(index)
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene has no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// The demo scene: three small spheres resting above a huge floor sphere,
    /// lit by an ambient term, one point light and one directional light.
    pub fn reference() -> Self {
        let mut scene = Scene::new();

        // Constants below are all valid, so the edits cannot fail.
        let spheres = [
            (Vec3::new(0.0, -1.0, 3.0), Rgb::RED, 1, Some(500), 0.2),
            (Vec3::new(2.0, 0.0, 4.0), Rgb::BLUE, 1, Some(500), 0.3),
            (Vec3::new(-2.0, 0.0, 4.0), Rgb::GREEN, 1, Some(10), 0.4),
            (Vec3::new(0.0, -5001.0, 0.0), Rgb::YELLOW, 5000, Some(1000), 0.5),
        ];
        for (center, color, radius, specular, reflectivity) in spheres {
            scene.spheres.push(Sphere {
                center,
                color,
                specular,
                reflectivity,
                radius,
                r_square: square(radius),
            });
        }

        scene.lights.ambient = 0.2;
        scene.lights.point.push(PointLight {
            position: Vec3::new(2.0, 1.0, 0.0),
            intensity: 0.6,
        });
        scene.lights.directional.push(DirectionalLight {
            direction: Vec3::new(1.0, 4.0, 4.0),
            intensity: 0.2,
        });
        scene.background = Rgb::BLACK;

        scene
    }
}

fn square(radius: u32) -> u64 {
    u64::from(radius) * u64::from(radius)
}

fn check_finite(what: &'static str, value: Vec3) -> SceneResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::NonFinite { what, value })
    }
}

fn check_intensity(intensity: f64) -> SceneResult<()> {
    if intensity.is_finite() {
        Ok(())
    } else {
        Err(SceneError::InvalidIntensity(intensity))
    }
}
