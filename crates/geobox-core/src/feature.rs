//! Rectangle feature as held by the drawing engine.

use crate::geometry::BoundingBox;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Identifier for a feature in the drawing engine.
pub type FeatureId = Uuid;

/// The drawing engine's representation of a rectangle: an identifier plus
/// an ordered closed ring of five coordinate pairs (first and last
/// identical). The core treats the ring as opaque except for extracting
/// the extreme coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleFeature {
    id: FeatureId,
    /// Closed ring, x = longitude, y = latitude.
    pub ring: [Point; 5],
}

impl RectangleFeature {
    /// Create a feature with a fresh id from a bounding box.
    pub fn from_bbox(bbox: BoundingBox) -> Self {
        Self {
            id: Uuid::new_v4(),
            ring: bbox.ring(),
        }
    }

    /// Reconstruct a feature with a known id (engine-side bookkeeping).
    pub fn reconstruct(id: FeatureId, ring: [Point; 5]) -> Self {
        Self { id, ring }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Derive a bounding box from the ring's extreme coordinates.
    ///
    /// The ring is never empty, so this cannot fail; the result may still
    /// be degenerate and must be validated.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.ring).unwrap_or_else(|| {
            // Unreachable: the ring always holds five points.
            BoundingBox::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
        })
    }

    /// GeoJSON `Feature` payload, matching what the map layer consumes.
    pub fn to_geojson(&self) -> serde_json::Value {
        let coordinates: Vec<[f64; 2]> = self.ring.iter().map(|p| [p.x, p.y]).collect();
        json!({
            "type": "Feature",
            "properties": {
                "mode": "rectangle"
            },
            "geometry": {
                "type": "Polygon",
                "coordinates": [coordinates]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bbox_ring_matches_corners() {
        let bbox = BoundingBox::new(-10.0, 40.0, 5.0, 50.0);
        let feature = RectangleFeature::from_bbox(bbox);
        assert_eq!(feature.ring[0], Point::new(-10.0, 40.0));
        assert_eq!(feature.ring[1], Point::new(5.0, 40.0));
        assert_eq!(feature.ring[2], Point::new(5.0, 50.0));
        assert_eq!(feature.ring[3], Point::new(-10.0, 50.0));
        assert_eq!(feature.ring[4], feature.ring[0]);
    }

    #[test]
    fn test_bounding_box_roundtrip() {
        let bbox = BoundingBox::new(-8.0, 41.0, 4.0, 49.0);
        let feature = RectangleFeature::from_bbox(bbox);
        assert_eq!(feature.bounding_box(), bbox);
    }

    #[test]
    fn test_bounding_box_from_rotated_ring() {
        // The extremes are the same whichever corner the ring starts at.
        let ring = [
            Point::new(5.0, 50.0),
            Point::new(-10.0, 50.0),
            Point::new(-10.0, 40.0),
            Point::new(5.0, 40.0),
            Point::new(5.0, 50.0),
        ];
        let feature = RectangleFeature::reconstruct(Uuid::new_v4(), ring);
        assert_eq!(feature.bounding_box(), BoundingBox::new(-10.0, 40.0, 5.0, 50.0));
    }

    #[test]
    fn test_geojson_shape() {
        let bbox = BoundingBox::new(-10.0, 40.0, 5.0, 50.0);
        let feature = RectangleFeature::from_bbox(bbox);
        let geojson = feature.to_geojson();
        assert_eq!(geojson["type"], "Feature");
        assert_eq!(geojson["properties"]["mode"], "rectangle");
        assert_eq!(geojson["geometry"]["type"], "Polygon");
        let ring = geojson["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], json!([-10.0, 40.0]));
        assert_eq!(ring[4], ring[0]);
    }
}
