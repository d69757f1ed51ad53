//! Prelude module for common proj-crs types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use proj_crs::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::CrsBuilder,
    config::{CrsOptions, Origin, ScaleSource},
    geo::{LatLng, Point},
    transformation::Transformation,
};

pub use crate::crs::{Crs, ScaleTable};

pub use crate::projection::{
    Projection, ProjectionAdapter, ProjectionRegistry, ProjectionSource,
};

pub use crate::{CrsError, Result};
