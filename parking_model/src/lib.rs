//! The parking data model: vehicle classes with their standard space
//! dimensions, coarse parking areas, the grid estimator that fills an area
//! with individual spaces, and the size-based reclassifier for spaces that
//! are already mapped.

mod area;
mod estimator;
mod reclassify;
mod types;

pub use crate::area::{ParkingArea, SIZE_THRESHOLD_M2};
pub use crate::estimator::{fit_spaces, EstimatedSpace};
pub use crate::reclassify::{
    classify_dimensions, measure_dimensions, reclassify_collection, reclassify_feature,
    ReclassifyStats, TRUCK_MIN_LENGTH, TRUCK_MIN_WIDTH,
};
pub use crate::types::{
    VehicleClass, CAR_SPACE_LENGTH, CAR_SPACE_WIDTH, TRUCK_SPACE_LENGTH, TRUCK_SPACE_WIDTH,
};
