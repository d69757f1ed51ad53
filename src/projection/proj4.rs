use crate::projection::{Projection, WGS84_DEFINITION};
use crate::{CrsError, Result};
use proj4rs::Proj;

/// Projection backed by proj4rs, transforming between WGS84 and a target CRS.
///
/// proj4rs works in radians for geographic systems; this wrapper takes and
/// returns degrees on the geographic side and native units on the target side.
pub struct Proj4Projection {
    wgs84: Proj,
    target: Proj,
    target_is_geo: bool,
}

impl Proj4Projection {
    /// Builds the projection from a PROJ string such as `+proj=merc +a=6378137 ...`
    pub fn from_definition(code: &str, definition: &str) -> Result<Self> {
        let wgs84 = Proj::from_proj_string(WGS84_DEFINITION).map_err(invalid_definition(code))?;
        let target = Proj::from_proj_string(definition).map_err(invalid_definition(code))?;
        let target_is_geo = target.is_latlong();
        Ok(Self {
            wgs84,
            target,
            target_is_geo,
        })
    }

    fn transform(&self, src: &Proj, dst: &Proj, mut point: (f64, f64)) -> (f64, f64) {
        match proj4rs::transform::transform(src, dst, &mut point) {
            Ok(()) => point,
            Err(e) => {
                log::debug!("proj4 transform of {:?} failed: {}", point, e);
                (f64::NAN, f64::NAN)
            }
        }
    }
}

fn invalid_definition<E: std::fmt::Display>(code: &str) -> impl Fn(E) -> CrsError + '_ {
    move |e| CrsError::InvalidDefinition {
        code: code.to_string(),
        reason: e.to_string(),
    }
}

impl Projection for Proj4Projection {
    fn forward(&self, lng: f64, lat: f64) -> (f64, f64) {
        let (x, y) = self.transform(
            &self.wgs84,
            &self.target,
            (lng.to_radians(), lat.to_radians()),
        );
        if self.target_is_geo {
            (x.to_degrees(), y.to_degrees())
        } else {
            (x, y)
        }
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let point = if self.target_is_geo {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };
        let (lng, lat) = self.transform(&self.target, &self.wgs84, point);
        (lng.to_degrees(), lat.to_degrees())
    }
}
