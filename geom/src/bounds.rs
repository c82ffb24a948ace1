use serde::{Deserialize, Serialize};

use crate::{Distance, LonLat, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LON};

/// An axis-aligned bounding box in lon/lat degrees.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GPSBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GPSBounds {
    pub fn new() -> GPSBounds {
        GPSBounds {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn from(pts: &[LonLat]) -> GPSBounds {
        let mut b = GPSBounds::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.longitude);
        self.max_lon = self.max_lon.max(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.min_lon
            && pt.longitude <= self.max_lon
            && pt.latitude >= self.min_lat
            && pt.latitude <= self.max_lat
    }

    /// Width of the box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Grow the box by a fixed margin on every side, like the buffer around a
    /// parking area when requesting imagery.
    pub fn buffered(&self, margin: Distance) -> GPSBounds {
        let lat_buffer = margin.inner_meters() / METERS_PER_DEGREE_LAT;
        let lon_buffer = margin.inner_meters()
            / (METERS_PER_DEGREE_LON * self.center().latitude.to_radians().cos());
        GPSBounds {
            min_lon: self.min_lon - lon_buffer,
            min_lat: self.min_lat - lat_buffer,
            max_lon: self.max_lon + lon_buffer,
            max_lat: self.max_lat + lat_buffer,
        }
    }
}

impl Default for GPSBounds {
    fn default() -> Self {
        GPSBounds::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_and_contains() {
        let mut b = GPSBounds::new();
        b.update(LonLat::new(4.0, 52.0));
        b.update(LonLat::new(4.1, 52.1));
        assert!(b.contains(LonLat::new(4.05, 52.05)));
        assert!(!b.contains(LonLat::new(3.9, 52.05)));
        assert_eq!(b.center(), LonLat::new(4.05, 52.05));
    }

    #[test]
    fn buffered_grows_every_side() {
        let b = GPSBounds::from(&[LonLat::new(4.0, 52.0), LonLat::new(4.01, 52.01)]);
        let bigger = b.buffered(Distance::meters(20.0));
        assert!(bigger.min_lon < b.min_lon);
        assert!(bigger.min_lat < b.min_lat);
        assert!(bigger.max_lon > b.max_lon);
        assert!(bigger.max_lat > b.max_lat);
    }
}
