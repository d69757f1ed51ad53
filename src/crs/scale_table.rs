//! Per-zoom-level scale table
//!
//! A `ScaleTable` maps integer zoom levels to scales (pixels per map unit). It is
//! built once from explicit scales, scale denominators, ground resolutions, or
//! synthesized from the map bounds, and answers fractional `scale(zoom)` and
//! inverse `zoom(scale)` queries by linear interpolation.
//!
//! Queries never fail: an undefined level reads as `NaN`, and a scale finer than
//! the last level maps to `f64::INFINITY`.

use crate::core::{
    bounds::Bounds,
    constants::{DEFAULT_ZOOM_LEVELS, METERS_PER_INCH, SCREEN_DPI, TILE_SIZE},
};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaleTable {
    levels: Vec<Option<f64>>,
}

/// Converts a unitless map scale into a 96-DPI device scale
fn to_device_scale(scale: f64) -> f64 {
    SCREEN_DPI * scale / METERS_PER_INCH
}

impl ScaleTable {
    /// Table with no levels
    pub fn empty() -> Self {
        Self::default()
    }

    /// Explicit map scales (e.g. `1.0 / 50_000.0`), converted to device scales
    pub fn from_scales(scales: &[f64]) -> Self {
        Self {
            levels: scales.iter().map(|&s| Some(to_device_scale(s))).collect(),
        }
    }

    /// Scale denominators (e.g. `50_000.0`), inverted then converted to device scales
    pub fn from_scale_denominators(denominators: &[f64]) -> Self {
        Self {
            levels: denominators
                .iter()
                .map(|&d| Some(to_device_scale(1.0 / d)))
                .collect(),
        }
    }

    /// Ground resolutions in map units per pixel, inverted without DPI conversion.
    ///
    /// Missing, zero and `NaN` entries leave their level undefined.
    pub fn from_resolutions(resolutions: &[Option<f64>]) -> Self {
        let mut levels = vec![None; resolutions.len()];
        for (i, resolution) in resolutions.iter().enumerate().rev() {
            match resolution {
                Some(r) if *r != 0.0 && !r.is_nan() => levels[i] = Some(1.0 / r),
                _ => log::trace!("no resolution for zoom level {}, leaving it undefined", i),
            }
        }
        Self { levels }
    }

    /// Synthesizes 23 power-of-two levels so that level 0 fits the larger side
    /// of `bounds` into one tile
    pub fn from_bounds(bounds: &Bounds) -> Self {
        let resolution = bounds.extent() / TILE_SIZE as f64;
        Self {
            levels: (0..DEFAULT_ZOOM_LEVELS)
                .map(|i| Some(2_f64.powi(i as i32) / resolution))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Scale at an integer level, `None` when undefined or out of range
    pub fn get(&self, level: usize) -> Option<f64> {
        self.levels.get(level).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.levels.iter().copied()
    }

    /// Highest level that has a scale
    pub fn max_zoom(&self) -> Option<usize> {
        self.levels.iter().rposition(Option::is_some)
    }

    /// Scale at a signed level, `NaN` when undefined
    fn value_at(&self, level: f64) -> f64 {
        if level < 0.0 {
            return f64::NAN;
        }
        self.get(level as usize).unwrap_or(f64::NAN)
    }

    /// Scale for a (possibly fractional) zoom level.
    ///
    /// Fractional zooms interpolate linearly between the two surrounding levels;
    /// there is no extrapolation, so anything past the last defined pair is `NaN`.
    pub fn scale(&self, zoom: f64) -> f64 {
        let base_zoom = zoom.floor();
        if zoom == base_zoom {
            return self.value_at(zoom);
        }
        let base_scale = self.value_at(base_zoom);
        let next_scale = self.value_at(base_zoom + 1.0);
        base_scale + (next_scale - base_scale) * (zoom - base_zoom)
    }

    /// Closest defined scale at or below `scale`, in a single backward pass
    fn closest_below(&self, scale: f64) -> Option<f64> {
        let mut low: Option<f64> = None;
        for value in self.levels.iter().rev().flatten() {
            if *value <= scale && low.map_or(true, |l| l < *value) {
                low = Some(*value);
            }
        }
        low
    }

    /// Zoom level for a scale, inverse of [`ScaleTable::scale`].
    ///
    /// Returns `f64::INFINITY` when `scale` is finer than the last known level and
    /// `NaN` when it is coarser than every level.
    pub fn zoom(&self, scale: f64) -> f64 {
        let down_scale = self.closest_below(scale);
        let down_zoom = down_scale
            .and_then(|down| self.levels.iter().position(|v| *v == Some(down)))
            .map_or(-1, |i| i as i64);
        let down_scale = down_scale.unwrap_or(f64::NAN);

        if scale == down_scale {
            return down_zoom as f64;
        }

        let next_zoom = down_zoom + 1;
        match self.get(next_zoom as usize) {
            Some(next_scale) => {
                (scale - down_scale) / (next_scale - down_scale) + down_zoom as f64
            }
            None => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEVICE_SCALE_FACTOR;
    use approx::assert_relative_eq;

    fn increasing() -> ScaleTable {
        ScaleTable::from_resolutions(&[Some(8.0), Some(4.0), Some(2.0), Some(1.0)])
    }

    #[test]
    fn test_explicit_scales_use_device_scale() {
        let table = ScaleTable::from_scales(&[1.0, 2.0, 4.0]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some(96.0 / 0.0254));
        assert_relative_eq!(table.get(1).unwrap(), 7559.055118110236, epsilon = 1e-9);
        assert_relative_eq!(table.get(2).unwrap(), 15118.110236220472, epsilon = 1e-9);
    }

    #[test]
    fn test_denominators_match_inverted_scales() {
        let denominators = [2000.0, 1000.0, 500.0, 200.0];
        let inverted: Vec<f64> = denominators.iter().map(|d| 1.0 / d).collect();
        assert_eq!(
            ScaleTable::from_scale_denominators(&denominators),
            ScaleTable::from_scales(&inverted)
        );
    }

    #[test]
    fn test_resolutions_skip_device_scale() {
        let resolutions = ScaleTable::from_resolutions(&[Some(1000.0), Some(500.0)]);
        let denominators = ScaleTable::from_scale_denominators(&[1000.0, 500.0]);
        for level in 0..2 {
            assert_relative_eq!(
                denominators.get(level).unwrap() / resolutions.get(level).unwrap(),
                DEVICE_SCALE_FACTOR,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_resolutions_leave_falsy_levels_undefined() {
        let table =
            ScaleTable::from_resolutions(&[Some(0.0), Some(2.0), None, Some(8.0), Some(f64::NAN)]);
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![None, Some(0.5), None, Some(0.125), None]
        );
        assert_eq!(table.max_zoom(), Some(3));
    }

    #[test]
    fn test_bounds_synthesis() {
        let table = ScaleTable::from_bounds(&Bounds::from_coords(0.0, 0.0, 2560.0, 2560.0));
        assert_eq!(table.len(), 23);
        assert_eq!(table.get(0), Some(0.1));
        assert_eq!(table.get(1), Some(0.2));
        assert_eq!(table.get(22), Some(2_f64.powi(22) / 10.0));
        assert_eq!(table.get(23), None);
    }

    #[test]
    fn test_bounds_synthesis_uses_larger_side() {
        let table = ScaleTable::from_bounds(&Bounds::from_coords(0.0, 0.0, 512.0, 2560.0));
        assert_eq!(table.get(0), Some(0.1));
    }

    #[test]
    fn test_integer_scale_is_exact() {
        let table = increasing();
        for (level, expected) in [0.125, 0.25, 0.5, 1.0].into_iter().enumerate() {
            assert_eq!(table.scale(level as f64), expected);
        }
    }

    #[test]
    fn test_fractional_scale_interpolates() {
        let table = increasing();
        for t in [0.0, 0.25, 0.5, 0.75] {
            let expected = 0.25 + (0.5 - 0.25) * t;
            assert_relative_eq!(table.scale(1.0 + t), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_scale_out_of_range_is_nan() {
        let table = increasing();
        assert!(table.scale(4.0).is_nan());
        assert!(table.scale(3.5).is_nan());
        assert!(table.scale(-1.0).is_nan());
        assert!(table.scale(-0.5).is_nan());
        assert!(ScaleTable::empty().scale(0.0).is_nan());
    }

    #[test]
    fn test_scale_across_undefined_level_is_nan() {
        let table = ScaleTable::from_resolutions(&[Some(4.0), None, Some(1.0)]);
        assert!(table.scale(1.0).is_nan());
        assert!(table.scale(0.5).is_nan());
        assert!(table.scale(1.5).is_nan());
    }

    #[test]
    fn test_zoom_round_trip() {
        let table = increasing();
        for level in 0..4 {
            assert_eq!(table.zoom(table.scale(level as f64)), level as f64);
        }
    }

    #[test]
    fn test_zoom_interpolates() {
        let table = increasing();
        assert_relative_eq!(table.zoom(0.375), 1.5, epsilon = 1e-12);
        assert_relative_eq!(table.zoom(0.75), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zoom_beyond_last_level_is_infinite() {
        assert_eq!(increasing().zoom(2.0), f64::INFINITY);
        assert_eq!(ScaleTable::empty().zoom(1.0), f64::INFINITY);
    }

    #[test]
    fn test_zoom_before_interior_gap_is_infinite() {
        let table = ScaleTable::from_resolutions(&[None, Some(2.0), None, Some(8.0)]);
        // Closest value at or below 0.6 is 0.5 at level 1, and level 2 is undefined
        assert_eq!(table.zoom(0.6), f64::INFINITY);
        assert_eq!(table.zoom(0.5), 1.0);
    }

    #[test]
    fn test_zoom_below_first_level_is_nan() {
        assert!(increasing().zoom(0.01).is_nan());
    }

    #[test]
    fn test_zoom_prefers_lowest_index_for_duplicates() {
        let table = ScaleTable::from_resolutions(&[Some(2.0), Some(1.0), Some(1.0), Some(0.5)]);
        assert_eq!(table.zoom(1.0), 1.0);
        // Interpolating from level 1 divides by the zero step to level 2
        assert_eq!(table.zoom(1.5), f64::INFINITY);
    }

    #[test]
    fn test_zoom_on_non_monotonic_table() {
        let table = ScaleTable::from_resolutions(&[Some(0.25), Some(1.0), Some(0.5)]);
        // Closest value at or below 3.0 is 2.0 at level 2, and there is no level 3
        assert_eq!(table.zoom(3.0), f64::INFINITY);
        assert_eq!(table.zoom(2.0), 2.0);
        // Closest value at or below 1.5 is 1.0 at level 1, next is 2.0
        assert_relative_eq!(table.zoom(1.5), 1.5, epsilon = 1e-12);
        // Only level 0 sits above every other value
        assert_eq!(table.zoom(4.0), 0.0);
    }
}
