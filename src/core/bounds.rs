use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in planar (projected) or pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundsRepr")]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

/// Accepted configuration shapes: `[[x1, y1], [x2, y2]]` or `{ "min": .., "max": .. }`
#[derive(Deserialize)]
#[serde(untagged)]
enum BoundsRepr {
    Corners([[f64; 2]; 2]),
    MinMax { min: Point, max: Point },
}

impl From<BoundsRepr> for Bounds {
    fn from(repr: BoundsRepr) -> Self {
        match repr {
            BoundsRepr::Corners([a, b]) => Bounds::from_corners(a.into(), b.into()),
            BoundsRepr::MinMax { min, max } => Bounds::from_corners(min, max),
        }
    }
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from two arbitrary corners, normalizing them to min/max
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            Point::new(a.x.min(b.x), a.y.min(b.y)),
            Point::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Larger of width and height
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }
}
