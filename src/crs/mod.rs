//! Custom coordinate reference system
//!
//! [`Crs`] combines a projection with a per-zoom scale table and an
//! origin-based pixel transformation. It is built once per map and only read
//! afterwards, so it can be shared freely between threads.
//!
//! ```no_run
//! use proj_crs::{Crs, CrsOptions, ProjectionSource};
//!
//! let options = CrsOptions::from_json(
//!     r#"{"origin": [-180, 90], "scaleDenominators": [2000, 1000, 500, 200, 100]}"#,
//! )?;
//! let crs = Crs::with_global_registry(ProjectionSource::code("EPSG:4326"), options)?;
//! let zoom = crs.zoom(crs.scale(2.5));
//! # Ok::<(), proj_crs::CrsError>(())
//! ```

pub mod scale_table;

use crate::core::{
    bounds::Bounds,
    config::{CrsOptions, ScaleSource},
    constants::MEAN_EARTH_RADIUS,
    geo::{LatLng, Point},
    transformation::Transformation,
};
use crate::projection::{ProjectionAdapter, ProjectionRegistry, ProjectionSource};
use crate::Result;

pub use scale_table::ScaleTable;

#[derive(Debug, Clone)]
pub struct Crs {
    code: String,
    projection: ProjectionAdapter,
    origin: Option<Point>,
    transformation: Transformation,
    scales: ScaleTable,
    infinite: bool,
}

impl Crs {
    /// Builds a CRS, resolving codes through `registry`
    pub fn new(
        source: ProjectionSource,
        options: CrsOptions,
        registry: &ProjectionRegistry,
    ) -> Result<Self> {
        let code = match &source {
            ProjectionSource::Code { code, .. } | ProjectionSource::Ready { code, .. } => {
                code.clone()
            }
        };
        let projection = ProjectionAdapter::create(source, options.bounds.clone(), registry)?;
        let origin = options.origin.map(|o| o.to_point());
        let transformation = options.resolve_transformation();

        let source = options.scale_source();
        let scales = match source {
            ScaleSource::Scales => {
                ScaleTable::from_scales(options.scales.as_deref().unwrap_or_default())
            }
            ScaleSource::ScaleDenominators => ScaleTable::from_scale_denominators(
                options.scale_denominators.as_deref().unwrap_or_default(),
            ),
            ScaleSource::Resolutions => {
                ScaleTable::from_resolutions(options.resolutions.as_deref().unwrap_or_default())
            }
            ScaleSource::Bounds => match &options.bounds {
                Some(bounds) => ScaleTable::from_bounds(bounds),
                None => ScaleTable::empty(),
            },
            ScaleSource::None => ScaleTable::empty(),
        };
        let infinite = options.bounds.is_none();

        log::debug!(
            "built CRS {} ({}) with {} zoom levels from {:?} (infinite: {})",
            code,
            projection.code(),
            scales.len(),
            source,
            infinite
        );

        Ok(Self {
            code,
            projection,
            origin,
            transformation,
            scales,
            infinite,
        })
    }

    /// Builds a CRS against the process-wide [`ProjectionRegistry::global`]
    pub fn with_global_registry(source: ProjectionSource, options: CrsOptions) -> Result<Self> {
        Self::new(source, options, ProjectionRegistry::global())
    }

    /// Geographic to planar coordinates
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        self.projection.project(lat_lng)
    }

    /// Planar to geographic coordinates
    pub fn unproject(&self, point: &Point) -> LatLng {
        self.projection.unproject(point)
    }

    /// Scale for a (possibly fractional) zoom; `NaN` outside the table
    pub fn scale(&self, zoom: f64) -> f64 {
        self.scales.scale(zoom)
    }

    /// Zoom for a scale; `f64::INFINITY` past the finest level
    pub fn zoom(&self, scale: f64) -> f64 {
        self.scales.zoom(scale)
    }

    /// Great-circle distance in meters
    pub fn distance(&self, a: &LatLng, b: &LatLng) -> f64 {
        a.distance_to(b)
    }

    /// Earth radius used by [`Crs::distance`]
    pub fn radius(&self) -> f64 {
        MEAN_EARTH_RADIUS
    }

    /// Geographic coordinates to pixel coordinates at `zoom`
    pub fn lat_lng_to_point(&self, lat_lng: &LatLng, zoom: f64) -> Point {
        self.transformation
            .transform(self.project(lat_lng), self.scale(zoom))
    }

    /// Pixel coordinates at `zoom` back to geographic coordinates
    pub fn point_to_lat_lng(&self, point: &Point, zoom: f64) -> LatLng {
        self.unproject(&self.transformation.untransform(*point, self.scale(zoom)))
    }

    /// Projection bounds in pixel coordinates at `zoom`, `None` for infinite CRSs
    pub fn projected_bounds(&self, zoom: f64) -> Option<Bounds> {
        if self.infinite {
            return None;
        }
        let bounds = self.projection.bounds()?;
        let scale = self.scale(zoom);
        Some(Bounds::from_corners(
            self.transformation.transform(bounds.min, scale),
            self.transformation.transform(bounds.max, scale),
        ))
    }

    /// Custom projections do not wrap longitudes
    pub fn wrap_lat_lng(&self, lat_lng: LatLng) -> LatLng {
        lat_lng
    }

    /// Code as requested; [`ProjectionAdapter::code`] holds the one it resolved to
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True when no bounds were configured, regardless of the scale source
    pub fn infinite(&self) -> bool {
        self.infinite
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.projection.bounds()
    }

    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn scales(&self) -> &ScaleTable {
        &self.scales
    }

    pub fn projection(&self) -> &ProjectionAdapter {
        &self.projection
    }
}
