//! Bounding box value type and validation.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An axis-aligned geographic bounding box in WGS84 degrees.
///
/// Immutable once constructed; state transitions replace the whole box,
/// never mutate individual fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// Why a candidate box was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGeometry {
    /// Zero width or height (`min == max` on an axis).
    #[error("degenerate box: zero extent on at least one axis")]
    Degenerate,
    /// `min > max` on an axis.
    #[error("inverted box: min exceeds max on at least one axis")]
    Inverted,
    /// A coordinate is NaN or infinite (covers unparsable input).
    #[error("non-finite coordinate")]
    NotFinite,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// The four corners as a closed ring, counter-clockwise from the
    /// south-west corner, first point repeated last.
    pub fn ring(&self) -> [Point; 5] {
        [
            Point::new(self.min_lon, self.min_lat),
            Point::new(self.max_lon, self.min_lat),
            Point::new(self.max_lon, self.max_lat),
            Point::new(self.min_lon, self.max_lat),
            Point::new(self.min_lon, self.min_lat),
        ]
    }

    /// The box as a kurbo rect (x = longitude, y = latitude).
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }

    /// Smallest box covering all the given points.
    ///
    /// Returns `None` on an empty iterator. The result may be degenerate;
    /// callers validate before acting on it.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self::new(first.x, first.y, first.x, first.y);
        for p in points {
            bbox.min_lon = bbox.min_lon.min(p.x);
            bbox.min_lat = bbox.min_lat.min(p.y);
            bbox.max_lon = bbox.max_lon.max(p.x);
            bbox.max_lat = bbox.max_lat.max(p.y);
        }
        Some(bbox)
    }
}

/// Decide whether a candidate box is well-formed and non-degenerate.
///
/// Pure function, no side effects; must run before any state mutation or
/// outward render. On success the box is returned unchanged.
pub fn validate(bbox: BoundingBox) -> Result<BoundingBox, InvalidGeometry> {
    let coords = [bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat];
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(InvalidGeometry::NotFinite);
    }
    if bbox.min_lon > bbox.max_lon || bbox.min_lat > bbox.max_lat {
        return Err(InvalidGeometry::Inverted);
    }
    if bbox.min_lon == bbox.max_lon || bbox.min_lat == bbox.max_lat {
        return Err(InvalidGeometry::Degenerate);
    }
    Ok(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_box_passes_through_unchanged() {
        let bbox = BoundingBox::new(-10.0, 40.0, 5.0, 50.0);
        assert_eq!(validate(bbox), Ok(bbox));
    }

    #[test]
    fn test_degenerate_longitude_rejected() {
        let bbox = BoundingBox::new(10.0, 20.0, 10.0, 25.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::Degenerate));
    }

    #[test]
    fn test_degenerate_latitude_rejected() {
        let bbox = BoundingBox::new(10.0, 20.0, 15.0, 20.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::Degenerate));
    }

    #[test]
    fn test_inverted_rejected() {
        let bbox = BoundingBox::new(10.0, 20.0, 5.0, 25.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::Inverted));
        let bbox = BoundingBox::new(10.0, 25.0, 15.0, 20.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::Inverted));
    }

    #[test]
    fn test_non_finite_rejected() {
        let bbox = BoundingBox::new(f64::NAN, 20.0, 15.0, 25.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::NotFinite));
        let bbox = BoundingBox::new(10.0, 20.0, f64::INFINITY, 25.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::NotFinite));
    }

    #[test]
    fn test_nan_reported_as_not_finite_not_inverted() {
        // NaN comparisons are all false; the finiteness check must come first.
        let bbox = BoundingBox::new(10.0, f64::NAN, 5.0, 25.0);
        assert_eq!(validate(bbox), Err(InvalidGeometry::NotFinite));
    }

    #[test]
    fn test_ring_is_closed() {
        let bbox = BoundingBox::new(-10.0, 40.0, 5.0, 50.0);
        let ring = bbox.ring();
        assert_eq!(ring[0], ring[4]);
        assert_eq!(ring[0], Point::new(-10.0, 40.0));
        assert_eq!(ring[2], Point::new(5.0, 50.0));
    }

    #[test]
    fn test_from_points_extremes() {
        let points = vec![
            Point::new(3.0, 49.0),
            Point::new(-8.0, 41.0),
            Point::new(4.0, 45.0),
        ];
        let bbox = BoundingBox::from_points(points).unwrap();
        assert_eq!(bbox, BoundingBox::new(-8.0, 41.0, 4.0, 49.0));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }
}
