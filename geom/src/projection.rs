/// Meters per degree of latitude. Constant everywhere, to well within the
/// accuracy this system needs.
pub const METERS_PER_DEGREE_LAT: f64 = 111320.0;

/// Meters per degree of longitude before the cos(latitude) correction. This is
/// a deliberately coarse, non-ellipsoidal value tuned for ~52°N; every use
/// multiplies it by cos(latitude).
pub const METERS_PER_DEGREE_LON: f64 = 70000.0;

/// Convert a length in meters to (latitude, longitude) degree deltas at the
/// given latitude.
///
/// The cosine isn't guarded against zero; the domain is restricted to Dutch
/// latitudes, nowhere near the poles.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> (f64, f64) {
    let lat_deg = meters / METERS_PER_DEGREE_LAT;
    let lon_deg = meters / (METERS_PER_DEGREE_LON * latitude.to_radians().cos());
    (lat_deg, lon_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_scale_is_constant() {
        let (lat_deg, _) = meters_to_degrees(111320.0, 52.0);
        assert!((lat_deg - 1.0).abs() < 1e-12);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let (_, lon_at_50) = meters_to_degrees(100.0, 50.0);
        let (_, lon_at_54) = meters_to_degrees(100.0, 54.0);
        // The same distance spans more degrees of longitude further north.
        assert!(lon_at_54 > lon_at_50);
    }
}
