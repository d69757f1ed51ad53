use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Affine pixel transformation `(a, b, c, d)`:
/// `x' = scale * (a * x + b)`, `y' = scale * (c * y + d)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Transformation {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Pixel transformation anchored at a planar origin, Y axis pointing down
    pub fn from_origin(origin: Point) -> Self {
        Self::new(1.0, -origin.x, -1.0, origin.y)
    }

    /// Applies the transformation at the given scale
    pub fn transform(&self, point: Point, scale: f64) -> Point {
        Point::new(self.a * point.x + self.b, self.c * point.y + self.d).multiply(scale)
    }

    /// Reverses [`Transformation::transform`]
    pub fn untransform(&self, point: Point, scale: f64) -> Point {
        Point::new(
            (point.x / scale - self.b) / self.a,
            (point.y / scale - self.d) / self.c,
        )
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::new(1.0, 0.0, -1.0, 0.0)
    }
}
