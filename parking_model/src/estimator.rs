//! Lays out a grid of estimated parking-space rectangles inside an area
//! polygon. This is visualization-grade packing: an area-proportional grid
//! plus containment filtering, not real bin-packing, so the placed count can
//! deviate from the requested capacity.

use anyhow::Result;

use geom::{meters_to_degrees, Angle, Distance, LonLat, Polygon};

use crate::VehicleClass;

// Slack between neighboring spaces, for door room and maneuvering.
const SPACING_FACTOR: f64 = 1.2;

/// One estimated parking space: a nominal-size rectangle placed on the map.
/// Created by `fit_spaces`, serialized immediately, never mutated.
#[derive(Clone, Debug)]
pub struct EstimatedSpace {
    /// 1-based ordinal within the parent area, in emission order.
    pub space_number: usize,
    pub center: LonLat,
    pub vehicle_type: VehicleClass,
    pub width: Distance,
    pub length: Distance,
    pub polygon: Polygon,
    /// The imagery-derived orientation, when one was detected.
    pub rotation: Option<Angle>,
}

impl EstimatedSpace {
    pub fn area_m2(&self) -> f64 {
        self.width.inner_meters() * self.length.inner_meters()
    }

    pub fn to_geojson(&self) -> geojson::Feature {
        let mut properties = serde_json::Map::new();
        properties.insert("space_number".to_string(), self.space_number.into());
        properties.insert(
            "vehicle_type".to_string(),
            self.vehicle_type.as_str().into(),
        );
        properties.insert("width_m".to_string(), self.width.inner_meters().into());
        properties.insert("length_m".to_string(), self.length.inner_meters().into());
        properties.insert("area_m2".to_string(), self.area_m2().into());
        properties.insert("estimated".to_string(), true.into());
        properties.insert(
            "rotation_angle".to_string(),
            match self.rotation {
                Some(angle) => angle.to_degrees().into(),
                None => serde_json::Value::Null,
            },
        );
        properties.insert(
            "satellite_analyzed".to_string(),
            self.rotation.is_some().into(),
        );

        geojson::Feature {
            bbox: None,
            geometry: Some(self.polygon.to_geojson()),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

// How many grid cells fit in the area's bounding box. With a known capacity,
// rescale the grid isotropically to approximately hit that count.
fn grid_dimensions(
    width_deg: f64,
    height_deg: f64,
    spaced_width_deg: f64,
    spaced_length_deg: f64,
    capacity: usize,
) -> (usize, usize) {
    let mut cols = ((width_deg / spaced_width_deg).floor() as usize).max(1);
    let mut rows = ((height_deg / spaced_length_deg).floor() as usize).max(1);

    if capacity > 0 {
        let total = (rows * cols) as f64;
        let scale = (capacity as f64 / total).sqrt();
        rows = (((rows as f64) * scale).floor() as usize).max(1);
        cols = (((cols as f64) * scale).floor() as usize).max(1);
    }
    (rows, cols)
}

/// Fit vehicle-sized spaces into a parking-area polygon.
///
/// Grid cells whose center falls outside the polygon are discarded, so the
/// result can under-fill a nonzero `capacity`; when enough cells survive, the
/// emission stops at exactly `capacity` spaces. A detected `rotation` turns
/// each rectangle about its own center; `None` means axis-aligned.
pub fn fit_spaces(
    polygon: &Polygon,
    capacity: usize,
    vehicle_type: VehicleClass,
    centroid_lat: f64,
    rotation: Option<Angle>,
) -> Result<Vec<EstimatedSpace>> {
    let (space_width, space_length) = vehicle_type.dimensions();

    let (lat_deg_per_m, lon_deg_per_m) = meters_to_degrees(1.0, centroid_lat);
    let spaced_width_deg = space_width.inner_meters() * lon_deg_per_m * SPACING_FACTOR;
    let spaced_length_deg = space_length.inner_meters() * lat_deg_per_m * SPACING_FACTOR;

    let bounds = polygon.get_bounds();
    let (rows, cols) = grid_dimensions(
        bounds.width(),
        bounds.height(),
        spaced_width_deg,
        spaced_length_deg,
        capacity,
    );

    let mut spaces = Vec::new();
    'grid: for row in 0..rows {
        for col in 0..cols {
            let center = LonLat::new(
                bounds.min_lon + (col as f64 + 0.5) * (bounds.width() / cols as f64),
                bounds.min_lat + (row as f64 + 0.5) * (bounds.height() / rows as f64),
            );
            if !polygon.contains(center) {
                continue;
            }

            let mut rect = Polygon::rectangle_centered(center, space_width, space_length)?;
            if let Some(angle) = rotation {
                // Negated to map the image-frame angle to map-frame orientation.
                if angle.to_degrees() != 0.0 {
                    rect = rect.rotate_around(-angle, center);
                }
            }

            spaces.push(EstimatedSpace {
                space_number: spaces.len() + 1,
                center,
                vehicle_type,
                width: space_width,
                length: space_length,
                polygon: rect,
                rotation,
            });

            if capacity > 0 && spaces.len() == capacity {
                break 'grid;
            }
        }
    }

    Ok(spaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_polygon(width_m: f64, length_m: f64) -> Polygon {
        Polygon::rectangle_centered(
            LonLat::new(4.5, 52.0),
            Distance::meters(width_m),
            Distance::meters(length_m),
        )
        .unwrap()
    }

    #[test]
    fn grid_dimensions_for_a_square() {
        let polygon = rect_polygon(31.0, 31.0);
        let bounds = polygon.get_bounds();
        let (lat_deg_per_m, lon_deg_per_m) = meters_to_degrees(1.0, 52.0);

        let (rows, cols) = grid_dimensions(
            bounds.width(),
            bounds.height(),
            2.5 * lon_deg_per_m * SPACING_FACTOR,
            5.0 * lat_deg_per_m * SPACING_FACTOR,
            0,
        );
        // floor(31 / 3.0) columns, floor(31 / 6.0) rows
        assert_eq!((rows, cols), (5, 10));
    }

    #[test]
    fn every_center_lands_inside_a_convex_polygon() {
        // A hexagon roughly 50m across
        let centroid = LonLat::new(4.5, 52.0);
        let (lat_deg_per_m, lon_deg_per_m) = meters_to_degrees(1.0, centroid.latitude);
        let mut pts = Vec::new();
        for i in 0..6 {
            let angle = (i as f64) * std::f64::consts::PI / 3.0;
            pts.push(LonLat::new(
                centroid.longitude + 25.0 * angle.cos() * lon_deg_per_m,
                centroid.latitude + 25.0 * angle.sin() * lat_deg_per_m,
            ));
        }
        pts.push(pts[0]);
        let polygon = Polygon::new(geom::Ring::new(pts).unwrap());

        let spaces = fit_spaces(&polygon, 0, VehicleClass::Car, 52.0, None).unwrap();
        assert!(!spaces.is_empty());
        for space in &spaces {
            assert!(polygon.contains(space.center));
        }
    }

    #[test]
    fn capacity_caps_the_emission() {
        // Wide and shallow: one row, plenty of columns
        let polygon = rect_polygon(76.0, 7.0);
        let spaces = fit_spaces(&polygon, 5, VehicleClass::Car, 52.0, None).unwrap();
        assert_eq!(spaces.len(), 5);
        let numbers: Vec<usize> = spaces.iter().map(|s| s.space_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn unreachable_capacity_underfills_silently() {
        let polygon = rect_polygon(6.5, 5.0);
        let spaces = fit_spaces(&polygon, 10, VehicleClass::Car, 52.0, None).unwrap();
        // The rescaled grid only has 2x4 cells, all of them inside
        assert_eq!(spaces.len(), 8);
        assert_eq!(spaces.last().unwrap().space_number, 8);
    }

    #[test]
    fn rotation_turns_each_rectangle() {
        let polygon = rect_polygon(40.0, 40.0);
        let angle = Angle::degrees(45.0);
        let spaces = fit_spaces(&polygon, 0, VehicleClass::Car, 52.0, Some(angle)).unwrap();
        assert!(!spaces.is_empty());

        let space = &spaces[0];
        assert_eq!(space.rotation, Some(angle));
        // A rotated rectangle no longer has axis-aligned edges: more than two
        // distinct longitudes among its corners.
        let mut lons: Vec<f64> = space
            .polygon
            .points()
            .iter()
            .map(|pt| pt.longitude)
            .collect();
        lons.sort_by(|a, b| a.partial_cmp(b).unwrap());
        lons.dedup();
        assert!(lons.len() > 2);
    }

    #[test]
    fn geojson_properties() {
        let polygon = rect_polygon(40.0, 40.0);
        let spaces =
            fit_spaces(&polygon, 0, VehicleClass::Truck, 52.0, Some(Angle::degrees(90.0)))
                .unwrap();
        let feature = spaces[0].to_geojson();
        let props = feature.properties.unwrap();
        assert_eq!(props["space_number"], 1);
        assert_eq!(props["vehicle_type"], "truck");
        assert_eq!(props["width_m"], 4.0);
        assert_eq!(props["length_m"], 15.0);
        assert_eq!(props["area_m2"], 60.0);
        assert_eq!(props["estimated"], true);
        assert_eq!(props["rotation_angle"], 90.0);
        assert_eq!(props["satellite_analyzed"], true);

        let unrotated = fit_spaces(&polygon, 0, VehicleClass::Car, 52.0, None).unwrap();
        let props = unrotated[0].to_geojson().properties.unwrap();
        assert_eq!(props["rotation_angle"], serde_json::Value::Null);
        assert_eq!(props["satellite_analyzed"], false);
    }
}
