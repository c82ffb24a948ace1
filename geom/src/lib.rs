//! Small-area planar geometry on raw longitude/latitude coordinates.
//!
//! Everything here assumes the local-tangent-plane approximation: polygons are
//! small (a parking lot, not a province) and live at Dutch latitudes, so
//! degrees can be scaled to meters with fixed per-axis factors. Results
//! degrade gracefully instead of failing on weird input.

mod angle;
mod bounds;
mod distance;
mod gps;
mod polygon;
mod projection;
mod ring;

pub use crate::angle::Angle;
pub use crate::bounds::GPSBounds;
pub use crate::distance::Distance;
pub use crate::gps::LonLat;
pub use crate::polygon::Polygon;
pub use crate::projection::{meters_to_degrees, METERS_PER_DEGREE_LAT, METERS_PER_DEGREE_LON};
pub use crate::ring::Ring;

/// Reduce a f64's precision to 4 decimal places, so distances can be compared
/// exactly and serialize compactly.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

pub(crate) fn serialize_f64<S: serde::Serializer>(x: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(*x)
}

pub(crate) fn deserialize_f64<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let x = <f64 as serde::Deserialize>::deserialize(d)?;
    Ok(trim_f64(x))
}
