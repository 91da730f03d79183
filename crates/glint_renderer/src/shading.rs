//! Light intensity at a surface point.
//!
//! Intensity is a plain scalar: ambient, plus a Lambert term and an optional
//! Phong highlight for every light that is not blocked. It is not clamped
//! here; clamping happens when the surface colour is scaled by it.

use glint_core::Scene;
use glint_math::{magnitude, reflect, Interval, Ray, Vec3};

use crate::intersect::{any_intersection, closest_intersection};
use crate::EPSILON;

/// Total light intensity arriving at `point`.
///
/// * `normal` - surface normal at `point`
/// * `view` - vector from `point` back toward the viewer (the negated ray direction)
/// * `specular` - Phong exponent, or `None` for a matte surface
pub fn compute_lighting(
    scene: &Scene,
    point: Vec3,
    normal: Vec3,
    view: Vec3,
    specular: Option<u32>,
) -> f64 {
    let lights = &scene.lights;
    let mut intensity = lights.ambient();

    for light in lights.directional() {
        let shadow_ray = Ray::new(point, light.direction);
        if closest_intersection(scene, &shadow_ray, Interval::unbounded_from(EPSILON)).is_some() {
            continue;
        }
        intensity += light_contribution(light.intensity, light.direction, normal, view, specular);
    }

    for light in lights.point() {
        let to_light = light.position - point;
        // t = 1 is the light itself, so anything past it casts no shadow
        let shadow_ray = Ray::new(point, to_light);
        if any_intersection(scene, &shadow_ray, Interval::new(EPSILON, 1.0)) {
            continue;
        }
        intensity += light_contribution(light.intensity, to_light, normal, view, specular);
    }

    intensity
}

/// Diffuse plus specular from one unoccluded light along `to_light`.
fn light_contribution(
    intensity: f64,
    to_light: Vec3,
    normal: Vec3,
    view: Vec3,
    specular: Option<u32>,
) -> f64 {
    let mut contribution = 0.0;

    let n_dot_l = normal.dot(to_light);
    if n_dot_l > 0.0 {
        contribution += intensity * n_dot_l / (magnitude(normal) * magnitude(to_light));
    }

    if let Some(exponent) = specular {
        let r = reflect(to_light, normal);
        let r_dot_v = r.dot(view);
        if r_dot_v > 0.0 {
            let cos = r_dot_v / (magnitude(r) * magnitude(view));
            contribution += intensity * cos.powf(f64::from(exponent));
        }
    }

    contribution
}
