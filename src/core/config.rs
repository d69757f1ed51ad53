//! Configuration for custom CRS instances
//!
//! `CrsOptions` mirrors the option object a Leaflet-style CRS accepts. It can be
//! filled in code, through [`crate::core::builder::CrsBuilder`], or deserialized
//! from camelCase JSON.

use crate::core::{bounds::Bounds, geo::Point, transformation::Transformation};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Origin of the pixel transformation, given either as `[x, y]` or `{ "x": .., "y": .. }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Origin {
    Coords([f64; 2]),
    Point(Point),
}

impl Origin {
    /// Normalizes either form to a planar point
    pub fn to_point(self) -> Point {
        match self {
            Origin::Coords(coords) => Point::from(coords),
            Origin::Point(point) => point,
        }
    }
}

impl From<Point> for Origin {
    fn from(point: Point) -> Self {
        Origin::Point(point)
    }
}

/// Which configuration input drives scale table derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleSource {
    Scales,
    ScaleDenominators,
    Resolutions,
    Bounds,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrsOptions {
    pub origin: Option<Origin>,
    pub scales: Option<Vec<f64>>,
    pub scale_denominators: Option<Vec<f64>>,
    /// Ground units per pixel; `null` or `0` leaves the level undefined
    pub resolutions: Option<Vec<Option<f64>>>,
    pub bounds: Option<Bounds>,
    pub transformation: Option<Transformation>,
}

impl CrsOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Highest-priority scale input present: scales, then denominators, then
    /// resolutions, then bounds
    pub fn scale_source(&self) -> ScaleSource {
        if self.scales.is_some() {
            ScaleSource::Scales
        } else if self.scale_denominators.is_some() {
            ScaleSource::ScaleDenominators
        } else if self.resolutions.is_some() {
            ScaleSource::Resolutions
        } else if self.bounds.is_some() {
            ScaleSource::Bounds
        } else {
            ScaleSource::None
        }
    }

    /// Pixel transformation: origin-based when an origin is set, otherwise the
    /// configured override or the Y-flipping default
    pub fn resolve_transformation(&self) -> Transformation {
        match self.origin {
            Some(origin) => Transformation::from_origin(origin.to_point()),
            None => self.transformation.unwrap_or_default(),
        }
    }
}
