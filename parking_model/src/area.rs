use geom::{LonLat, Polygon};
use log::warn;

use crate::VehicleClass;

/// No real truck bay fits in under this footprint, whatever the source tags
/// claim. This area-level rule is independent from the per-space edge
/// thresholds in `reclassify`; both run, at different pipeline stages.
pub const SIZE_THRESHOLD_M2: f64 = 30.0;

// Aisles and verges eat a chunk of any lot; only this share of the footprint
// holds actual spaces.
const PACKING_EFFICIENCY: f64 = 0.6;

/// A coarse parking-area polygon from a source dataset, before any individual
/// spaces are known. Built once per source record and handed to the estimator.
#[derive(Clone, Debug)]
pub struct ParkingArea {
    pub polygon: Polygon,
    /// Number of spaces according to source tags; 0 when unknown.
    pub capacity: usize,
    pub vehicle_type: VehicleClass,
    /// The owning facility's centroid, used for all meter/degree conversions.
    pub centroid: LonLat,
}

impl ParkingArea {
    pub fn new(
        polygon: Polygon,
        capacity: usize,
        vehicle_type: VehicleClass,
        centroid: LonLat,
    ) -> ParkingArea {
        ParkingArea {
            polygon,
            capacity,
            vehicle_type,
            centroid,
        }
    }

    pub fn area_m2(&self) -> f64 {
        self.polygon.area_m2(self.centroid.latitude)
    }

    /// The tagged class, downgraded to Car when the whole area is too small to
    /// hold even one truck bay. An unmeasurable (zero-area) polygon disables
    /// the rule.
    pub fn size_checked_class(&self) -> VehicleClass {
        let area = self.area_m2();
        if area > 0.0 && area < SIZE_THRESHOLD_M2 && self.vehicle_type.is_heavy() {
            warn!(
                "Area too small ({:.1} m2) for {}, reclassifying as car/van",
                area, self.vehicle_type
            );
            return VehicleClass::Car;
        }
        self.vehicle_type
    }

    /// Guess a capacity from the footprint when the tags don't provide one.
    pub fn estimate_capacity_from_area(&self, vehicle_type: VehicleClass) -> usize {
        let area = self.area_m2();
        if area <= 0.0 {
            return 0;
        }
        let (width, length) = vehicle_type.dimensions();
        let space_area = width.inner_meters() * length.inner_meters();
        ((area * PACKING_EFFICIENCY) / space_area) as usize
    }
}
