use std::fmt;

use anyhow::Result;
use geo::{Area, Contains};
use serde::{Deserialize, Serialize};

use crate::{
    meters_to_degrees, Angle, Distance, GPSBounds, LonLat, Ring, METERS_PER_DEGREE_LAT,
    METERS_PER_DEGREE_LON,
};

/// A polygon in lon/lat space, represented by its outer ring. Parking
/// geometry never has holes, so there's no interior-ring support.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    ring: Ring,
}

impl Polygon {
    pub fn new(ring: Ring) -> Polygon {
        Polygon { ring }
    }

    /// Extracts the outer ring of a GeoJSON Polygon geometry. For
    /// MultiPolygons, just uses the first polygon.
    pub fn from_geojson(value: &geojson::Value) -> Result<Polygon> {
        let raw_rings = match value {
            geojson::Value::Polygon(rings) => rings,
            geojson::Value::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    anyhow::bail!("MultiPolygon with no polygons");
                }
                &polygons[0]
            }
            _ => anyhow::bail!("Unexpected geometry type"),
        };
        if raw_rings.is_empty() {
            anyhow::bail!("Polygon with no rings");
        }
        let pts: Vec<LonLat> = raw_rings[0]
            .iter()
            .map(|pair| LonLat::new(pair[0], pair[1]))
            .collect();
        Ok(Polygon::new(Ring::new(pts)?))
    }

    pub fn to_geojson(&self) -> geojson::Geometry {
        let pts: Vec<Vec<f64>> = self
            .ring
            .points()
            .iter()
            .map(|pt| vec![pt.longitude, pt.latitude])
            .collect();
        geojson::Geometry::new(geojson::Value::Polygon(vec![pts]))
    }

    /// An axis-aligned rectangle of the given metric dimensions, centered on a
    /// point. Width spans longitude, height spans latitude.
    pub fn rectangle_centered(center: LonLat, width: Distance, height: Distance) -> Result<Polygon> {
        let (lat_deg_per_m, lon_deg_per_m) = meters_to_degrees(1.0, center.latitude);
        let half_width = (width.inner_meters() / 2.0) * lon_deg_per_m;
        let half_height = (height.inner_meters() / 2.0) * lat_deg_per_m;
        let ring = Ring::new(vec![
            LonLat::new(center.longitude - half_width, center.latitude - half_height),
            LonLat::new(center.longitude + half_width, center.latitude - half_height),
            LonLat::new(center.longitude + half_width, center.latitude + half_height),
            LonLat::new(center.longitude - half_width, center.latitude + half_height),
            LonLat::new(center.longitude - half_width, center.latitude - half_height),
        ])?;
        Ok(Polygon { ring })
    }

    pub fn points(&self) -> &Vec<LonLat> {
        self.ring.points()
    }

    /// The mean of the distinct vertices, which is good enough for small
    /// convex-ish parking shapes.
    pub fn centroid(&self) -> LonLat {
        let pts = self.ring.points();
        LonLat::center(&pts[..pts.len() - 1])
    }

    pub fn get_bounds(&self) -> GPSBounds {
        GPSBounds::from(self.ring.points())
    }

    /// Approximate area in square meters: shoelace area in square degrees,
    /// scaled to meters at the given latitude. Only valid for polygons small
    /// enough for the local-tangent-plane assumption. A degenerate (collinear)
    /// ring yields 0 rather than an error, which downstream size rules treat
    /// as "unknown".
    pub fn area_m2(&self, centroid_lat: f64) -> f64 {
        let area_deg2 = self.to_geo().unsigned_area();
        area_deg2 * METERS_PER_DEGREE_LAT * METERS_PER_DEGREE_LON * centroid_lat.to_radians().cos()
    }

    /// Does this polygon contain the point in its interior? Points exactly on
    /// the boundary don't count.
    pub fn contains(&self, pt: LonLat) -> bool {
        self.to_geo().contains(&geo::Point::from(pt))
    }

    /// Rotate every vertex counterclockwise about a pivot, treating lon/lat as
    /// planar Cartesian coordinates. Only sensible for small shapes.
    pub fn rotate_around(&self, angle: Angle, pivot: LonLat) -> Polygon {
        let (sin, cos) = angle.to_radians().sin_cos();
        let pts = self
            .ring
            .points()
            .iter()
            .map(|pt| {
                let x = pt.longitude - pivot.longitude;
                let y = pt.latitude - pivot.latitude;
                LonLat::new(
                    pivot.longitude + x * cos - y * sin,
                    pivot.latitude + y * cos + x * sin,
                )
            })
            .collect();
        Polygon {
            ring: Ring::must_new(pts),
        }
    }

    fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: Vec<geo::Coordinate<f64>> = self
            .ring
            .points()
            .iter()
            .map(|pt| geo::Coordinate::from(*pt))
            .collect();
        geo::Polygon::new(geo::LineString(exterior), Vec::new())
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Polygon with {} points", self.ring.points().len())
    }
}
