use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not normalized: camera rays point at the viewport plane
/// and shadow rays at the light itself, so the parameter `t` keeps its
/// meaning ("t = 1 reaches the light"). `D . D` is computed once at
/// construction and reused by every sphere test along this ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    direction_sq: f64,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            direction_sq: direction.dot(direction),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `direction . direction`, cached.
    #[inline]
    pub fn direction_sq(&self) -> f64 {
        self.direction_sq
    }

    /// True when the direction cannot produce an intersection: zero length
    /// or non-finite.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.direction_sq > 0.0 && self.direction_sq.is_finite())
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + t * self.direction
    }
}
