//! Host-facing attribute layer.
//!
//! The host supplies everything as key/value strings. Box coordinates
//! feed the sync loop and stay permissive: an absent or unparsable field
//! means "external update not yet complete", never an error. Map options
//! are consumed once at initialization.

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

pub const ATTR_MIN_LAT: &str = "min-lat";
pub const ATTR_MIN_LON: &str = "min-lon";
pub const ATTR_MAX_LAT: &str = "max-lat";
pub const ATTR_MAX_LON: &str = "max-lon";

pub const ATTR_TILE_URL: &str = "tile-url";
pub const ATTR_CENTER_LON: &str = "center-lon";
pub const ATTR_CENTER_LAT: &str = "center-lat";
pub const ATTR_ZOOM: &str = "zoom";
pub const ATTR_MIN_ZOOM: &str = "min-zoom";
pub const ATTR_MAX_ZOOM: &str = "max-zoom";

/// Whether `name` is one of the init-only map option keys.
pub fn is_option_key(name: &str) -> bool {
    matches!(
        name,
        ATTR_TILE_URL | ATTR_CENTER_LON | ATTR_CENTER_LAT | ATTR_ZOOM | ATTR_MIN_ZOOM | ATTR_MAX_ZOOM
    )
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}

/// The four box coordinates as independently-typed fields.
///
/// A candidate box exists only once all four are present; fields being
/// edited one at a time are the common case, not a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxAttributes {
    pub min_lon: Option<f64>,
    pub min_lat: Option<f64>,
    pub max_lon: Option<f64>,
    pub max_lat: Option<f64>,
}

impl BoxAttributes {
    /// Record an attribute value. Returns true if `name` is one of the
    /// four box coordinate keys.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        let slot = match name {
            ATTR_MIN_LON => &mut self.min_lon,
            ATTR_MIN_LAT => &mut self.min_lat,
            ATTR_MAX_LON => &mut self.max_lon,
            ATTR_MAX_LAT => &mut self.max_lat,
            _ => return false,
        };
        *slot = parse_coordinate(value);
        true
    }

    /// The candidate box, once all four coordinates are present.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(
            self.min_lon?,
            self.min_lat?,
            self.max_lon?,
            self.max_lat?,
        ))
    }
}

/// Map surface options, read once at initialization and not part of the
/// sync loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub tile_url: Option<String>,
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            tile_url: None,
            center_lon: 0.0,
            center_lat: 0.0,
            zoom: 2.0,
            min_zoom: 0.0,
            max_zoom: 14.0,
        }
    }
}

impl MapOptions {
    /// Record an option value, falling back to the existing value when it
    /// does not parse. Returns true if `name` is an option key.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        match name {
            ATTR_TILE_URL => {
                self.tile_url = value.map(str::to_owned);
            }
            ATTR_CENTER_LON => {
                self.center_lon = parse_coordinate(value).unwrap_or(self.center_lon);
            }
            ATTR_CENTER_LAT => {
                self.center_lat = parse_coordinate(value).unwrap_or(self.center_lat);
            }
            ATTR_ZOOM => {
                self.zoom = parse_coordinate(value).unwrap_or(self.zoom);
            }
            ATTR_MIN_ZOOM => {
                self.min_zoom = parse_coordinate(value).unwrap_or(self.min_zoom);
            }
            ATTR_MAX_ZOOM => {
                self.max_zoom = parse_coordinate(value).unwrap_or(self.max_zoom);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_attributes_yield_no_box() {
        let mut attrs = BoxAttributes::default();
        attrs.set(ATTR_MIN_LON, Some("-10"));
        attrs.set(ATTR_MIN_LAT, Some("40"));
        attrs.set(ATTR_MAX_LON, Some("5"));
        assert_eq!(attrs.bounding_box(), None);

        attrs.set(ATTR_MAX_LAT, Some("50"));
        assert_eq!(
            attrs.bounding_box(),
            Some(BoundingBox::new(-10.0, 40.0, 5.0, 50.0))
        );
    }

    #[test]
    fn test_unparsable_value_clears_the_field() {
        let mut attrs = BoxAttributes::default();
        attrs.set(ATTR_MIN_LON, Some("-10"));
        attrs.set(ATTR_MIN_LAT, Some("40"));
        attrs.set(ATTR_MAX_LON, Some("5"));
        attrs.set(ATTR_MAX_LAT, Some("50"));
        assert!(attrs.bounding_box().is_some());

        attrs.set(ATTR_MAX_LAT, Some("not a number"));
        assert_eq!(attrs.bounding_box(), None);

        attrs.set(ATTR_MAX_LAT, None);
        assert_eq!(attrs.bounding_box(), None);
    }

    #[test]
    fn test_whitespace_tolerated() {
        let mut attrs = BoxAttributes::default();
        attrs.set(ATTR_MIN_LON, Some("  -10.5 "));
        assert_eq!(attrs.min_lon, Some(-10.5));
    }

    #[test]
    fn test_unknown_key_reported() {
        let mut attrs = BoxAttributes::default();
        assert!(!attrs.set("tile-url", Some("https://tiles.example/{z}/{x}/{y}.png")));
        assert!(attrs.set(ATTR_MIN_LAT, Some("40")));
    }

    #[test]
    fn test_map_options_defaults() {
        let options = MapOptions::default();
        assert_eq!(options.zoom, 2.0);
        assert_eq!(options.min_zoom, 0.0);
        assert_eq!(options.max_zoom, 14.0);
        assert_eq!(options.center_lon, 0.0);
        assert!(options.tile_url.is_none());
    }

    #[test]
    fn test_map_options_fall_back_on_bad_values() {
        let mut options = MapOptions::default();
        assert!(options.set(ATTR_ZOOM, Some("6")));
        assert_eq!(options.zoom, 6.0);
        options.set(ATTR_ZOOM, Some("garbage"));
        assert_eq!(options.zoom, 6.0);

        assert!(options.set(ATTR_TILE_URL, Some("https://tiles.example/{z}/{x}/{y}.png")));
        assert!(options.tile_url.is_some());
        assert!(!options.set("unrelated", Some("1")));
    }
}
