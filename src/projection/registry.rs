//! Code → definition registry for projections
//!
//! Projections referenced by code (`EPSG:3857`, `urn:ogc:def:crs:EPSG::3857`)
//! are looked up here. A registry can be created per map or shared process-wide
//! through [`ProjectionRegistry::global`].

use crate::projection::WGS84_DEFINITION;
use crate::{CrsError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const NAD83_DEFINITION: &str = "+proj=longlat +ellps=GRS80 +datum=NAD83 +no_defs";
const WEB_MERCATOR_DEFINITION: &str = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 +lon_0=0.0 \
     +x_0=0.0 +y_0=0 +k=1.0 +units=m +nadgrids=@null +wktext +no_defs";

static GLOBAL: Lazy<ProjectionRegistry> = Lazy::new(ProjectionRegistry::with_defaults);

#[derive(Debug, Default)]
pub struct ProjectionRegistry {
    definitions: RwLock<HashMap<String, String>>,
}

impl ProjectionRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the geographic and Web Mercator definitions
    /// proj4 ships with, including their common aliases
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.define("EPSG:4326", WGS84_DEFINITION);
        registry.define("WGS84", WGS84_DEFINITION);
        registry.define("EPSG:4269", NAD83_DEFINITION);
        for code in ["EPSG:3857", "EPSG:3785", "GOOGLE", "EPSG:900913", "EPSG:102113"] {
            registry.define(code, WEB_MERCATOR_DEFINITION);
        }
        registry
    }

    /// Process-wide registry, seeded with the defaults on first use
    pub fn global() -> &'static ProjectionRegistry {
        &GLOBAL
    }

    /// Registers a definition, replacing any previous one for the same code
    pub fn define(&self, code: &str, definition: &str) {
        log::debug!("defining projection {}", code);
        self.write().insert(code.to_string(), definition.to_string());
    }

    pub fn get(&self, code: &str) -> Option<String> {
        self.read().get(code).cloned()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.read().contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Looks up `code`, retrying once with a URN shortened to `AUTHORITY:CODE`.
    ///
    /// Returns the code that matched together with its definition.
    pub fn resolve(&self, code: &str) -> Result<(String, String)> {
        if let Some(definition) = self.get(code) {
            return Ok((code.to_string(), definition));
        }

        let short = shorten_urn(code);
        if let Some(short) = short {
            if let Some(definition) = self.get(&short) {
                log::debug!("resolved projection {} as {}", code, short);
                return Ok((short, definition));
            }
        }

        Err(CrsError::ProjectionNotFound(code.to_string()))
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.definitions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.definitions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// `urn:ogc:def:crs:EPSG::3857` → `EPSG:3857`; `None` for codes with three or
/// fewer `:`-separated segments
fn shorten_urn(code: &str) -> Option<String> {
    let segments: Vec<&str> = code.split(':').collect();
    if segments.len() > 3 {
        let n = segments.len();
        Some(format!("{}:{}", segments[n - 3], segments[n - 1]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_urn() {
        assert_eq!(
            shorten_urn("urn:ogc:def:crs:EPSG::3857"),
            Some("EPSG:3857".to_string())
        );
        assert_eq!(
            shorten_urn("urn:ogc:def:crs:EPSG:6.6:4326"),
            Some("EPSG:4326".to_string())
        );
        assert_eq!(shorten_urn("EPSG:3857"), None);
        assert_eq!(shorten_urn("a:b:c"), None);
    }

    #[test]
    fn test_defaults() {
        let registry = ProjectionRegistry::with_defaults();
        assert!(registry.contains("EPSG:4326"));
        assert!(registry.contains("EPSG:900913"));
        assert_eq!(registry.get("GOOGLE"), registry.get("EPSG:3857"));
        assert!(ProjectionRegistry::new().is_empty());
    }

    #[test]
    fn test_define_overwrites() {
        let registry = ProjectionRegistry::new();
        registry.define("EPSG:32633", "+proj=utm +zone=33 +datum=WGS84");
        registry.define("EPSG:32633", "+proj=utm +zone=33 +ellps=WGS84");
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("EPSG:32633").as_deref(),
            Some("+proj=utm +zone=33 +ellps=WGS84")
        );
    }

    #[test]
    fn test_resolve_direct() {
        let registry = ProjectionRegistry::with_defaults();
        let (code, definition) = registry.resolve("EPSG:3857").unwrap();
        assert_eq!(code, "EPSG:3857");
        assert_eq!(definition, WEB_MERCATOR_DEFINITION);
    }

    #[test]
    fn test_resolve_urn_fallback() {
        let registry = ProjectionRegistry::with_defaults();
        let (code, _) = registry.resolve("urn:ogc:def:crs:EPSG::4326").unwrap();
        assert_eq!(code, "EPSG:4326");
    }

    #[test]
    fn test_resolve_missing_names_requested_code() {
        let registry = ProjectionRegistry::with_defaults();
        let err = registry.resolve("urn:ogc:def:crs:EPSG::99999").unwrap_err();
        match err {
            CrsError::ProjectionNotFound(code) => assert_eq!(code, "urn:ogc:def:crs:EPSG::99999"),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(
            registry.resolve("EPSG:bogus"),
            Err(CrsError::ProjectionNotFound(_))
        ));
    }

    #[test]
    fn test_global_is_shared() {
        ProjectionRegistry::global().define("TEST:GLOBAL", WGS84_DEFINITION);
        assert!(ProjectionRegistry::global().contains("TEST:GLOBAL"));
    }
}
