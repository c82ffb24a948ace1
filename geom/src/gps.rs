use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LON};

/// A geographic coordinate. Longitude is x, latitude is y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Distance to another point, on the local planar approximation: scale the
    /// latitude delta, scale the longitude delta by cos(mean latitude), and
    /// combine as Euclidean. Fine for points a parking lot apart, not a
    /// country apart.
    pub fn dist_meters(self, other: LonLat) -> Distance {
        let lat_diff = (other.latitude - self.latitude) * METERS_PER_DEGREE_LAT;
        let mean_lat = (self.latitude + other.latitude) / 2.0;
        let lon_diff =
            (other.longitude - self.longitude) * METERS_PER_DEGREE_LON * mean_lat.to_radians().cos();
        Distance::meters(lat_diff.hypot(lon_diff))
    }

    /// The arithmetic mean of some points.
    pub fn center(pts: &[LonLat]) -> LonLat {
        let mut lon = 0.0;
        let mut lat = 0.0;
        for pt in pts {
            lon += pt.longitude;
            lat += pt.latitude;
        }
        let len = pts.len() as f64;
        LonLat {
            longitude: lon / len,
            latitude: lat / len,
        }
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

impl From<LonLat> for geo::Coordinate<f64> {
    fn from(pt: LonLat) -> Self {
        geo::Coordinate {
            x: pt.longitude,
            y: pt.latitude,
        }
    }
}

impl From<LonLat> for geo::Point<f64> {
    fn from(pt: LonLat) -> Self {
        geo::Point::new(pt.longitude, pt.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_meters_along_each_axis() {
        let base = LonLat::new(4.5, 52.0);
        let north = LonLat::new(4.5, 52.0 + 100.0 / METERS_PER_DEGREE_LAT);
        assert_eq!(base.dist_meters(north), Distance::meters(100.0));

        let lon_scale = METERS_PER_DEGREE_LON * 52.0_f64.to_radians().cos();
        let east = LonLat::new(4.5 + 100.0 / lon_scale, 52.0);
        assert_eq!(base.dist_meters(east), Distance::meters(100.0));
    }

    #[test]
    fn dist_meters_is_symmetric() {
        let a = LonLat::new(4.48, 51.92);
        let b = LonLat::new(4.51, 51.94);
        assert_eq!(a.dist_meters(b), b.dist_meters(a));
    }
}
