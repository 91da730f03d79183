/// An open range of ray parameters `(min, max)`. Hits exactly at either
/// end are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `(min, +inf)`, the usual range for camera and reflection rays.
    pub fn unbounded_from(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    ///
    /// NaN is never surrounded.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }
}
