//! Reclassify already-mapped parking spaces by their measured dimensions,
//! following the CROW ASVV 2021 sizing standard: a truck bay is at least
//! 3.5m wide and 13m long.

use geojson::{Feature, FeatureCollection};
use geom::{Distance, LonLat};

use crate::VehicleClass;

pub const TRUCK_MIN_WIDTH: Distance = Distance::const_meters(3.5);
pub const TRUCK_MIN_LENGTH: Distance = Distance::const_meters(13.0);

const SIZE_BASED_METHOD: &str = "size-based (CROW ASVV 2021)";
const TAG_BASED_METHOD: &str = "tag-based";

/// Tallies from one reclassification run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReclassifyStats {
    pub trucks: usize,
    pub cars: usize,
    /// Point geometries can't be measured and keep their tag-derived class.
    pub points: usize,
}

/// Measure a space polygon from its first two edges: width is the shorter
/// edge, length the longer, area their product. `None` when the ring is too
/// short to have two edges.
pub fn measure_dimensions(ring: &[Vec<f64>]) -> Option<(Distance, Distance, f64)> {
    if ring.len() < 4 {
        return None;
    }
    let p0 = LonLat::new(ring[0][0], ring[0][1]);
    let p1 = LonLat::new(ring[1][0], ring[1][1]);
    let p2 = LonLat::new(ring[2][0], ring[2][1]);

    let edge1 = p0.dist_meters(p1);
    let edge2 = p1.dist_meters(p2);
    let width = edge1.min(edge2);
    let length = edge1.max(edge2);
    let area = width.inner_meters() * length.inner_meters();
    Some((width, length, area))
}

/// A space is truck-sized only when both minimums hold.
pub fn classify_dimensions(width: Distance, length: Distance) -> VehicleClass {
    if width >= TRUCK_MIN_WIDTH && length >= TRUCK_MIN_LENGTH {
        VehicleClass::Truck
    } else {
        VehicleClass::Car
    }
}

/// Reclassify every feature in a collection in place. Polygon features get
/// measured dimensions and a size-based class; Point features keep their
/// existing class, tagged as such. Running this twice gives the same result
/// as running it once.
pub fn reclassify_collection(collection: &mut FeatureCollection) -> ReclassifyStats {
    let mut stats = ReclassifyStats::default();
    for feature in &mut collection.features {
        reclassify_feature(feature, &mut stats);
    }
    stats
}

/// Reclassify one feature in place, tallying the outcome.
pub fn reclassify_feature(feature: &mut Feature, stats: &mut ReclassifyStats) {
    enum Shape {
        Measured(Distance, Distance, f64),
        Point,
        Skip,
    }

    let shape = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(geojson::Value::Polygon(rings)) => match rings.first().and_then(|r| measure_dimensions(r)) {
            // A degenerate ring with a zero-length edge can't be classified.
            Some((width, _, _)) if width == Distance::ZERO => Shape::Skip,
            Some((width, length, area)) => Shape::Measured(width, length, area),
            None => Shape::Skip,
        },
        Some(geojson::Value::Point(_)) => Shape::Point,
        _ => Shape::Skip,
    };

    match shape {
        Shape::Measured(width, length, area) => {
            let class = classify_dimensions(width, length);
            set_property(feature, "width_m", round2(width.inner_meters()));
            set_property(feature, "length_m", round2(length.inner_meters()));
            set_property(feature, "area_m2", round1(area));
            set_property(feature, "vehicle_type", class.as_str());
            set_property(feature, "classification_method", SIZE_BASED_METHOD);
            match class {
                VehicleClass::Truck => stats.trucks += 1,
                _ => stats.cars += 1,
            }
        }
        Shape::Point => {
            set_property(feature, "classification_method", TAG_BASED_METHOD);
            stats.points += 1;
            let is_truck = feature
                .properties
                .as_ref()
                .and_then(|props| props.get("vehicle_type"))
                .and_then(|v| v.as_str())
                == Some("truck");
            if is_truck {
                stats.trucks += 1;
            } else {
                stats.cars += 1;
            }
        }
        Shape::Skip => {}
    }
}

fn set_property(feature: &mut Feature, key: &str, value: impl Into<serde_json::Value>) {
    feature
        .properties
        .get_or_insert_with(serde_json::Map::new)
        .insert(key.to_string(), value.into());
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom::Polygon;

    fn space_feature(width_m: f64, length_m: f64) -> Feature {
        let polygon = Polygon::rectangle_centered(
            LonLat::new(4.5, 52.0),
            Distance::meters(width_m),
            Distance::meters(length_m),
        )
        .unwrap();
        Feature {
            bbox: None,
            geometry: Some(polygon.to_geojson()),
            id: None,
            properties: None,
            foreign_members: None,
        }
    }

    #[test]
    fn dimension_thresholds_are_exact() {
        for (width, length, expected) in [
            (3.5, 13.0, VehicleClass::Truck),
            (3.4, 13.0, VehicleClass::Car),
            (3.5, 12.9, VehicleClass::Car),
            (4.0, 15.0, VehicleClass::Truck),
            (2.5, 5.0, VehicleClass::Car),
        ] {
            assert_eq!(
                classify_dimensions(Distance::meters(width), Distance::meters(length)),
                expected,
                "{}x{}",
                width,
                length
            );
        }
    }

    #[test]
    fn measures_and_classifies_polygons() {
        let mut collection = FeatureCollection {
            bbox: None,
            features: vec![space_feature(3.5, 13.0), space_feature(2.5, 5.0)],
            foreign_members: None,
        };
        let stats = reclassify_collection(&mut collection);
        assert_eq!(stats.trucks, 1);
        assert_eq!(stats.cars, 1);
        assert_eq!(stats.points, 0);

        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["vehicle_type"], "truck");
        assert_eq!(props["width_m"], 3.5);
        assert_eq!(props["length_m"], 13.0);
        assert_eq!(props["area_m2"], 45.5);
        assert_eq!(props["classification_method"], SIZE_BASED_METHOD);

        let props = collection.features[1].properties.as_ref().unwrap();
        assert_eq!(props["vehicle_type"], "car");
    }

    #[test]
    fn reclassification_is_idempotent() {
        let mut collection = FeatureCollection {
            bbox: None,
            features: vec![space_feature(4.0, 15.0)],
            foreign_members: None,
        };
        reclassify_collection(&mut collection);
        let first = collection.features[0].properties.clone();
        reclassify_collection(&mut collection);
        assert_eq!(collection.features[0].properties, first);
    }

    #[test]
    fn points_keep_their_tagged_class() {
        let mut properties = serde_json::Map::new();
        properties.insert("vehicle_type".to_string(), "truck".into());
        let mut collection = FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                    4.5, 52.0,
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }],
            foreign_members: None,
        };
        let stats = reclassify_collection(&mut collection);
        assert_eq!(stats.points, 1);
        assert_eq!(stats.trucks, 1);

        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["vehicle_type"], "truck");
        assert_eq!(props["classification_method"], TAG_BASED_METHOD);
    }
}
