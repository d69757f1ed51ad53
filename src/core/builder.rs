//! CRS builder for fluent API configuration
//!
//! `CrsBuilder` collects a projection source and [`CrsOptions`] step by step and
//! builds the [`Crs`] against either an injected registry or the global one.

use crate::{
    core::{bounds::Bounds, config::CrsOptions, geo::Point, transformation::Transformation},
    crs::Crs,
    projection::{Projection, ProjectionRegistry, ProjectionSource},
    Result,
};
use std::sync::Arc;

/// Builder for creating and configuring Crs instances
pub struct CrsBuilder<'a> {
    source: ProjectionSource,
    options: CrsOptions,
    registry: Option<&'a ProjectionRegistry>,
}

impl<'a> CrsBuilder<'a> {
    /// Start from a projection code such as `EPSG:3857`
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            source: ProjectionSource::code(code),
            options: CrsOptions::default(),
            registry: None,
        }
    }

    /// Start from a ready projection implementation
    pub fn ready(code: impl Into<String>, projection: Arc<dyn Projection>) -> Self {
        Self {
            source: ProjectionSource::ready(code, projection),
            options: CrsOptions::default(),
            registry: None,
        }
    }

    /// Register a PROJ definition for the code; ignored for ready projections
    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        if let ProjectionSource::Code { definition: def, .. } = &mut self.source {
            *def = Some(definition.into());
        }
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: CrsOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the planar origin of the pixel transformation
    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.options.origin = Some(Point::new(x, y).into());
        self
    }

    pub fn scales(mut self, scales: Vec<f64>) -> Self {
        self.options.scales = Some(scales);
        self
    }

    pub fn scale_denominators(mut self, denominators: Vec<f64>) -> Self {
        self.options.scale_denominators = Some(denominators);
        self
    }

    /// Ground resolutions; use [`CrsBuilder::sparse_resolutions`] for tables with gaps
    pub fn resolutions(mut self, resolutions: Vec<f64>) -> Self {
        self.options.resolutions = Some(resolutions.into_iter().map(Some).collect());
        self
    }

    pub fn sparse_resolutions(mut self, resolutions: Vec<Option<f64>>) -> Self {
        self.options.resolutions = Some(resolutions);
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.options.bounds = Some(bounds);
        self
    }

    /// Override the pixel transformation; an origin takes precedence
    pub fn transformation(mut self, transformation: Transformation) -> Self {
        self.options.transformation = Some(transformation);
        self
    }

    /// Resolve codes through `registry` instead of the global one
    pub fn registry(mut self, registry: &'a ProjectionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<Crs> {
        let registry = self.registry.unwrap_or_else(|| ProjectionRegistry::global());
        Crs::new(self.source, self.options, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::CrsError;

    #[test]
    fn test_builder_with_injected_registry() {
        let registry = ProjectionRegistry::with_defaults();
        let crs = CrsBuilder::new("EPSG:3857")
            .origin(-20037508.342789244, 20037508.342789244)
            .resolutions(vec![156543.03392804097, 78271.51696402048])
            .registry(&registry)
            .build()
            .unwrap();

        assert_eq!(crs.code(), "EPSG:3857");
        assert_eq!(crs.scales().len(), 2);
        assert!(crs.infinite());

        let point = crs.lat_lng_to_point(&LatLng::new(0.0, 0.0), 0.0);
        assert!((point.x - 128.0).abs() < 1e-6);
        assert!((point.y - 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_builder_registers_definition() {
        let registry = ProjectionRegistry::new();
        let crs = CrsBuilder::new("EPSG:4326")
            .definition("+proj=longlat +datum=WGS84 +no_defs")
            .scale_denominators(vec![2000.0, 1000.0])
            .registry(&registry)
            .build()
            .unwrap();

        assert!(registry.contains("EPSG:4326"));
        assert_eq!(crs.scales().len(), 2);
    }

    #[test]
    fn test_builder_empty_definition_keeps_registered() {
        let registry = ProjectionRegistry::with_defaults();
        let crs = CrsBuilder::new("EPSG:3857")
            .definition("")
            .registry(&registry)
            .build()
            .unwrap();

        assert_eq!(crs.code(), "EPSG:3857");
        assert!(registry.get("EPSG:3857").map_or(false, |d| !d.is_empty()));
    }

    #[test]
    fn test_builder_unknown_code() {
        let registry = ProjectionRegistry::new();
        let result = CrsBuilder::new("EPSG:bogus").registry(&registry).build();
        assert!(matches!(result, Err(CrsError::ProjectionNotFound(_))));
    }

    #[test]
    fn test_builder_sparse_resolutions() {
        let registry = ProjectionRegistry::with_defaults();
        let crs = CrsBuilder::new("EPSG:4326")
            .sparse_resolutions(vec![None, Some(0.5)])
            .bounds(Bounds::from_coords(-180.0, -90.0, 180.0, 90.0))
            .registry(&registry)
            .build()
            .unwrap();

        assert_eq!(crs.scales().get(0), None);
        assert_eq!(crs.scale(1.0), 2.0);
        assert!(!crs.infinite());
    }
}
