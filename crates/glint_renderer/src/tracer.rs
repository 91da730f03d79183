//! Core recursive ray tracer.
//!
//! Implements Whitted-style tracing with:
//! - Closest-hit search over the sphere list
//! - Local shading from `compute_lighting`
//! - Mirror reflection blended by each sphere's reflectivity, to a fixed depth

use glint_core::{Camera, Rgb, Scene};
use glint_math::{normalize, reflect, Interval, Ray, Vec3};

use crate::band::DEFAULT_BAND_COUNT;
use crate::intersect::closest_intersection;
use crate::shading::compute_lighting;
use crate::EPSILON;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Width of the viewport rectangle in world units
    pub viewport_width: f64,
    /// Height of the viewport rectangle in world units
    pub viewport_height: f64,
    /// Distance from the camera to the viewport; also the near clip for camera rays
    pub distance: f64,
    /// Number of mirror bounces after the primary hit
    pub max_depth: u32,
    /// Horizontal bands the frame is split into
    pub band_count: usize,
    /// Worker threads; `None` uses one per logical CPU
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport_width: 2.0,
            viewport_height: 2.0,
            distance: 1.0,
            max_depth: 3,
            band_count: DEFAULT_BAND_COUNT,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Set the viewport size.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the reflection depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set how many bands a frame is split into.
    pub fn with_band_count(mut self, band_count: usize) -> Self {
        self.band_count = band_count;
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// Map a canvas pixel (origin at the screen centre, +y up) to a point on
/// the viewport plane in camera space.
#[inline]
pub fn canvas_to_viewport(x: i64, y: i64, width: usize, height: usize, config: &RenderConfig) -> Vec3 {
    Vec3::new(
        x as f64 * config.viewport_width / width as f64,
        y as f64 * config.viewport_height / height as f64,
        config.distance,
    )
}

/// Compute the colour seen along a ray.
///
/// `depth` is the number of reflection bounces still allowed; at zero the
/// local colour is returned without recursing.
pub fn trace_ray(scene: &Scene, ray: &Ray, ray_t: Interval, depth: u32) -> Rgb {
    let Some(hit) = closest_intersection(scene, ray, ray_t) else {
        return scene.background;
    };
    let sphere = hit.sphere;

    let point = ray.at(hit.t);
    let normal = normalize(point - sphere.center);
    let view = -ray.direction();

    let intensity = compute_lighting(scene, point, normal, view, sphere.specular);
    let local_color = sphere.color.scale(intensity);

    let r = sphere.reflectivity;
    if depth == 0 || r <= 0.0 {
        return local_color;
    }

    let reflected_ray = Ray::new(point, reflect(view, normal));
    let reflected_color = trace_ray(scene, &reflected_ray, Interval::unbounded_from(EPSILON), depth - 1);

    local_color.scale(1.0 - r) + reflected_color.scale(r)
}

/// Trace the primary ray for canvas pixel `(x, y)` of a `width` x `height` frame.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: i64,
    y: i64,
    width: usize,
    height: usize,
    config: &RenderConfig,
) -> Rgb {
    let direction = camera.world_direction(canvas_to_viewport(x, y, width, height, config));
    let ray = Ray::new(camera.position(), direction);
    trace_ray(scene, &ray, Interval::unbounded_from(config.distance), config.max_depth)
}
