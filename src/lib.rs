//! # proj-crs
//!
//! Custom coordinate reference systems for Leaflet-style map engines.
//!
//! A [`Crs`] adapts an arbitrary proj4 projection to a zoomable tiling scheme:
//! it turns explicit scales, scale denominators or ground resolutions (or just
//! the map bounds) into one per-zoom scale table, interpolates fractional zoom
//! levels, and maps scales back to zoom levels.

pub mod core;
pub mod crs;
pub mod prelude;
pub mod projection;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    builder::CrsBuilder,
    config::{CrsOptions, Origin, ScaleSource},
    geo::{LatLng, Point},
    transformation::Transformation,
};

pub use crate::crs::{Crs, ScaleTable};

pub use crate::projection::{
    Proj4Projection, Projection, ProjectionAdapter, ProjectionRegistry, ProjectionSource,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, CrsError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum CrsError {
    #[error("No projection definition for code {0}")]
    ProjectionNotFound(String),

    #[error("Invalid projection definition for {code}: {reason}")]
    InvalidDefinition { code: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CrsError {
    fn from(err: serde_json::Error) -> Self {
        CrsError::Config(err.to_string())
    }
}

/// Error type alias for convenience
pub type Error = CrsError;

/// Initializes `env_logger` for debugging; safe to call more than once
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}
