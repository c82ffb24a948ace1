use std::collections::BTreeMap;
use std::fmt;

use geom::Distance;
use serde::{Deserialize, Serialize};

/// Nominal dimensions of a car/van bay (N1 class).
pub const CAR_SPACE_WIDTH: Distance = Distance::const_meters(2.5);
pub const CAR_SPACE_LENGTH: Distance = Distance::const_meters(5.0);

/// Nominal dimensions of a truck bay (N2/N3 class).
pub const TRUCK_SPACE_WIDTH: Distance = Distance::const_meters(4.0);
pub const TRUCK_SPACE_LENGTH: Distance = Distance::const_meters(15.0);

/// The vehicle class a parking space is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Truck,
    Lzv,
}

impl VehicleClass {
    /// Nominal (width, length) of one space. LZVs park in truck-sized bays;
    /// only the label differs.
    pub fn dimensions(self) -> (Distance, Distance) {
        match self {
            VehicleClass::Car => (CAR_SPACE_WIDTH, CAR_SPACE_LENGTH),
            VehicleClass::Truck | VehicleClass::Lzv => (TRUCK_SPACE_WIDTH, TRUCK_SPACE_LENGTH),
        }
    }

    pub fn is_heavy(self) -> bool {
        matches!(self, VehicleClass::Truck | VehicleClass::Lzv)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Truck => "truck",
            VehicleClass::Lzv => "lzv",
        }
    }

    /// Human-readable map label.
    pub fn label(self) -> &'static str {
        match self {
            VehicleClass::Car => "Car/Van Parking Space",
            VehicleClass::Truck => "Truck Parking Space",
            VehicleClass::Lzv => "LZV Parking Space",
        }
    }

    /// Parse a source-data label, defaulting anything unrecognized to Car.
    pub fn parse(label: &str) -> VehicleClass {
        match label.to_lowercase().as_str() {
            "truck" | "hgv" => VehicleClass::Truck,
            "lzv" => VehicleClass::Lzv,
            _ => VehicleClass::Car,
        }
    }

    /// Classify a parking element from its raw OSM tags. The source datasets
    /// are truck facilities, so anything without an explicit designation still
    /// counts as truck parking.
    pub fn from_osm_tags(tags: &BTreeMap<String, String>) -> VehicleClass {
        let name = tags
            .get("name")
            .map(|n| n.to_lowercase())
            .unwrap_or_default();
        let is_hgv = matches!(
            tags.get("hgv").map(|v| v.as_str()),
            Some("designated") | Some("yes")
        ) || tags.contains_key("capacity:hgv")
            || tags.contains_key("capacity:truck")
            || name.contains("truck")
            || name.contains("hgv")
            || name.contains("vrachtwagen");

        if is_hgv {
            let is_lzv = name.contains("lzv")
                || name.contains("lang zwaar")
                || tags.get("maxlength").map(|v| v.as_str()) == Some("25.25");
            if is_lzv {
                return VehicleClass::Lzv;
            }
        }
        VehicleClass::Truck
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
