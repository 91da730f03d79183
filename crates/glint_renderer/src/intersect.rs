//! Ray-sphere intersection and the two scene queries built on it.
//!
//! The scene is a flat list, so both queries are a linear scan.

use glint_core::{Scene, Sphere};
use glint_math::{Interval, Ray};

/// The nearest sphere along a ray and the parameter where it was hit.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub sphere: &'a Sphere,
    pub t: f64,
}

/// Solve `|O + tD - C|^2 = r^2` for t.
///
/// Returns both roots, the `+sqrt` root first, or `None` when the ray misses
/// (negative discriminant) or has a zero-length direction.
#[inline]
pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere) -> Option<(f64, f64)> {
    if ray.is_degenerate() {
        return None;
    }

    let oc = ray.origin() - sphere.center;
    let a = ray.direction_sq();
    let b = 2.0 * oc.dot(ray.direction());
    let c = oc.dot(oc) - sphere.r_square() as f64;

    let discriminant = b * b - 4.0 * a * c;
    // Written this way round so a NaN discriminant is also a miss
    if !(discriminant >= 0.0) {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    Some(((-b + sqrtd) / (2.0 * a), (-b - sqrtd) / (2.0 * a)))
}

/// Find the nearest sphere hit with `t` strictly inside `ray_t`.
///
/// Equal distances resolve to the sphere that comes first in the scene.
pub fn closest_intersection<'a>(scene: &'a Scene, ray: &Ray, ray_t: Interval) -> Option<Hit<'a>> {
    let mut closest: Option<Hit<'a>> = None;
    let mut closest_so_far = ray_t.max;

    for sphere in scene.spheres() {
        let Some((t1, t2)) = intersect_ray_sphere(ray, sphere) else {
            continue;
        };
        for t in [t1, t2] {
            if ray_t.surrounds(t) && t < closest_so_far {
                closest_so_far = t;
                closest = Some(Hit { sphere, t });
            }
        }
    }

    closest
}

/// True as soon as any sphere is hit with `t` strictly inside `ray_t`.
///
/// Used for shadow rays, where which occluder it is does not matter.
pub fn any_intersection(scene: &Scene, ray: &Ray, ray_t: Interval) -> bool {
    scene.spheres().iter().any(|sphere| {
        intersect_ray_sphere(ray, sphere)
            .map_or(false, |(t1, t2)| ray_t.surrounds(t1) || ray_t.surrounds(t2))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Rgb;
    use glint_math::{normalize, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sphere(center: Vec3, radius: u32) -> Sphere {
        Sphere::new(center, Rgb::WHITE, radius, None, 0.0).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let s = sphere(Vec3::new(0.0, 0.0, 5.0), 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let (t1, t2) = intersect_ray_sphere(&ray, &s).unwrap();
        assert!((t1 - 6.0).abs() < 1e-12);
        assert!((t2 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let s = sphere(Vec3::new(0.0, 0.0, 5.0), 1);
        assert_eq!(intersect_ray_sphere(&Ray::new(Vec3::ZERO, Vec3::Y), &s), None);
        assert_eq!(
            intersect_ray_sphere(&Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::Z), &s),
            None
        );
    }

    #[test]
    fn test_large_sphere_keeps_its_size() {
        let s = sphere(Vec3::new(0.0, 0.0, 200_000.0), 70_000);
        let (far, near) = intersect_ray_sphere(&Ray::new(Vec3::ZERO, Vec3::Z), &s).unwrap();
        assert!((near - 130_000.0).abs() < 1e-6);
        assert!((far - 270_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction_misses() {
        let s = sphere(Vec3::ZERO, 10);
        assert_eq!(intersect_ray_sphere(&Ray::new(Vec3::ZERO, Vec3::ZERO), &s), None);
    }

    #[test]
    fn test_roots_through_centre_are_a_diameter_apart() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let center = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let radius = rng.gen_range(1..100u32);
            let origin = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            if (center - origin).length() < 1e-6 {
                continue;
            }
            let ray = Ray::new(origin, normalize(center - origin));
            let (t1, t2) = intersect_ray_sphere(&ray, &sphere(center, radius)).unwrap();
            assert!(
                (t1 - t2 - 2.0 * radius as f64).abs() < 1e-6,
                "t1={} t2={} r={}",
                t1,
                t2,
                radius
            );
        }
    }

    #[test]
    fn test_closest_picks_nearest() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 10.0), Rgb::RED, 1, None, 0.0).unwrap();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), Rgb::GREEN, 1, None, 0.0).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = closest_intersection(&scene, &ray, Interval::unbounded_from(0.0)).unwrap();
        assert_eq!(hit.sphere.color, Rgb::GREEN);
        assert!((hit.t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_respects_range() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), Rgb::RED, 1, None, 0.0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // Near root excluded: the far side of the sphere is found instead
        let hit = closest_intersection(&scene, &ray, Interval::unbounded_from(4.5)).unwrap();
        assert!((hit.t - 6.0).abs() < 1e-12);

        assert!(closest_intersection(&scene, &ray, Interval::new(0.0, 4.0)).is_none());
        assert!(closest_intersection(&scene, &ray, Interval::unbounded_from(6.0)).is_none());
    }

    #[test]
    fn test_ties_go_to_first_sphere() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), Rgb::RED, 1, None, 0.0).unwrap();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), Rgb::BLUE, 1, None, 0.0).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = closest_intersection(&scene, &ray, Interval::unbounded_from(0.0)).unwrap();
        assert_eq!(hit.sphere.color, Rgb::RED);
    }

    #[test]
    fn test_closest_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let mut scene = Scene::new();
            for _ in 0..rng.gen_range(1..20) {
                let center = Vec3::new(
                    rng.gen_range(-20.0..20.0),
                    rng.gen_range(-20.0..20.0),
                    rng.gen_range(-20.0..20.0),
                );
                scene
                    .add_sphere(center, Rgb::WHITE, rng.gen_range(1..6), None, 0.0)
                    .unwrap();
            }
            for _ in 0..50 {
                let direction = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
                let ray = Ray::new(Vec3::ZERO, direction);
                let range = Interval::unbounded_from(0.001);

                let mut best: Option<(usize, f64)> = None;
                for (i, s) in scene.spheres().iter().enumerate() {
                    if let Some((t1, t2)) = intersect_ray_sphere(&ray, s) {
                        for t in [t1, t2] {
                            if range.surrounds(t) && best.map_or(true, |(_, b)| t < b) {
                                best = Some((i, t));
                            }
                        }
                    }
                }

                let hit = closest_intersection(&scene, &ray, range);
                match (best, hit) {
                    (None, None) => {}
                    (Some((i, t)), Some(hit)) => {
                        assert_eq!(hit.t, t);
                        assert!(std::ptr::eq(hit.sphere, &scene.spheres()[i]));
                        assert!(any_intersection(&scene, &ray, range));
                    }
                    (best, hit) => panic!("brute force {:?} vs {:?}", best, hit.map(|h| h.t)),
                }
            }
        }
    }

    #[test]
    fn test_any_intersection() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), Rgb::RED, 1, None, 0.0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));

        assert!(any_intersection(&scene, &ray, Interval::new(0.001, 1.0)));
        // Occluder beyond the light (t > 1) must not count
        let short = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0));
        assert!(!any_intersection(&scene, &short, Interval::new(0.001, 1.0)));
        assert!(!any_intersection(&Scene::new(), &ray, Interval::new(0.001, 1.0)));
    }

    #[test]
    fn test_no_self_intersection_from_surface() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, Rgb::RED, 1, None, 0.0).unwrap();
        // Leaving the surface outward: the only root is t = 0
        let ray = Ray::new(Vec3::Y, Vec3::Y);
        assert!(!any_intersection(&scene, &ray, Interval::unbounded_from(0.001)));
        assert!(closest_intersection(&scene, &ray, Interval::unbounded_from(0.001)).is_none());
    }
}
