//! Core constants shared by the scale table and the CRS.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Screen resolution assumed when turning a unitless map scale into pixels.
pub const SCREEN_DPI: f64 = 96.0;

/// Meters per inch.
pub const METERS_PER_INCH: f64 = 0.0254;

/// Factor applied to unitless scales (`1 / denominator`) to get 96-DPI device scales.
pub const DEVICE_SCALE_FACTOR: f64 = SCREEN_DPI / METERS_PER_INCH;

/// Number of zoom levels synthesized from bounds when no scale source is configured.
pub const DEFAULT_ZOOM_LEVELS: usize = 23;

/// Mean Earth radius in meters, matching the haversine model used for distances.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;
