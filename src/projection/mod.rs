//! Projection adapter
//!
//! Normalizes access to a forward/inverse projection, whether the caller hands
//! over a ready implementation or a code (plus optional definition) that has to
//! be resolved through a [`ProjectionRegistry`].

pub mod proj4;
pub mod registry;

use crate::core::{
    bounds::Bounds,
    geo::{LatLng, Point},
};
use crate::Result;
use std::fmt;
use std::sync::Arc;

pub use proj4::Proj4Projection;
pub use registry::ProjectionRegistry;

/// WGS84 geographic coordinates, the geodetic side of every projection
pub const WGS84_DEFINITION: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Trait for map projections supporting forward and inverse transforms.
///
/// Geographic values are in degrees. Inputs are not range-checked; out of
/// domain coordinates produce whatever the implementation yields, including
/// non-finite values.
pub trait Projection: Send + Sync {
    /// Forward: (lng, lat) -> (x, y)
    fn forward(&self, lng: f64, lat: f64) -> (f64, f64);

    /// Inverse: (x, y) -> (lng, lat)
    fn inverse(&self, x: f64, y: f64) -> (f64, f64);
}

/// How a CRS names its projection
#[derive(Clone)]
pub enum ProjectionSource {
    /// A code to resolve through the registry; a definition, when given, is
    /// registered under the code first
    Code {
        code: String,
        definition: Option<String>,
    },
    /// A ready projection used as-is
    Ready {
        code: String,
        projection: Arc<dyn Projection>,
    },
}

impl ProjectionSource {
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code {
            code: code.into(),
            definition: None,
        }
    }

    pub fn with_definition(code: impl Into<String>, definition: impl Into<String>) -> Self {
        Self::Code {
            code: code.into(),
            definition: Some(definition.into()),
        }
    }

    pub fn ready(code: impl Into<String>, projection: Arc<dyn Projection>) -> Self {
        Self::Ready {
            code: code.into(),
            projection,
        }
    }
}

impl fmt::Debug for ProjectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code { code, definition } => f
                .debug_struct("Code")
                .field("code", code)
                .field("definition", definition)
                .finish(),
            Self::Ready { code, .. } => f.debug_struct("Ready").field("code", code).finish(),
        }
    }
}

/// A resolved projection together with its code and optional planar bounds
#[derive(Clone)]
pub struct ProjectionAdapter {
    code: String,
    definition: String,
    projection: Arc<dyn Projection>,
    bounds: Option<Bounds>,
}

impl ProjectionAdapter {
    /// Resolves `source` against `registry`.
    ///
    /// Fails with [`crate::CrsError::ProjectionNotFound`] when a code has no
    /// definition, even after shortening a URN to `AUTHORITY:CODE`.
    pub fn create(
        source: ProjectionSource,
        bounds: Option<Bounds>,
        registry: &ProjectionRegistry,
    ) -> Result<Self> {
        match source {
            ProjectionSource::Ready { code, projection } => Ok(Self {
                code,
                definition: String::new(),
                projection,
                bounds,
            }),
            ProjectionSource::Code { code, definition } => {
                // An empty definition means the code is already registered
                if let Some(definition) = definition.as_deref().filter(|d| !d.is_empty()) {
                    registry.define(&code, definition);
                }
                let (resolved, definition) = registry.resolve(&code)?;
                let projection = Proj4Projection::from_definition(&resolved, &definition)?;
                Ok(Self {
                    code: resolved,
                    definition,
                    projection: Arc::new(projection),
                    bounds,
                })
            }
        }
    }

    /// Geographic to planar coordinates
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let (lng, lat) = lat_lng.to_lng_lat();
        let (x, y) = self.projection.forward(lng, lat);
        Point::new(x, y)
    }

    /// Planar to geographic coordinates
    pub fn unproject(&self, point: &Point) -> LatLng {
        let (lng, lat) = self.projection.inverse(point.x, point.y);
        LatLng::new(lat, lng)
    }

    /// Code the projection was resolved under
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Definition string; empty for ready projections
    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

impl fmt::Debug for ProjectionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionAdapter")
            .field("code", &self.code)
            .field("definition", &self.definition)
            .field("bounds", &self.bounds)
            .finish()
    }
}
