use std::path::Path;

use anyhow::Result;
use geojson::FeatureCollection;
use serde::Deserialize;

use geom::{Angle, LonLat, Polygon};
use parking_model::{fit_spaces, ParkingArea, VehicleClass};

// Purple, to set estimated spaces apart from mapped ones on the map.
const ESTIMATED_SPACE_COLOR: &str = "#9333ea";

pub fn run(input: String, output: String, imagery_dir: Option<String>) -> Result<()> {
    let analysis: Analysis = serde_json::from_slice(&fs_err::read(&input)?)?;
    info!("Loaded {} facilities", analysis.facilities.len());

    // Only facilities where OSM has the coarse areas but nobody has mapped the
    // individual spaces need estimation.
    let candidates: Vec<&Facility> = analysis
        .facilities
        .iter()
        .filter(|f| !f.osm_parking_areas.is_empty() && f.individual_spaces_count == 0)
        .collect();
    info!(
        "Found {} facilities with parking areas but no individual spaces",
        candidates.len()
    );

    let mut features = Vec::new();
    let mut total_spaces = 0;
    for facility in &candidates {
        let mut facility_spaces = 0;
        for area in &facility.osm_parking_areas {
            match estimate_one_area(facility, area, imagery_dir.as_deref()) {
                Ok(area_features) => {
                    facility_spaces += area_features.len();
                    features.extend(area_features);
                }
                Err(err) => {
                    warn!(
                        "Skipping area {} of {}: {}",
                        area.osm_id, facility.facility_name, err
                    );
                }
            }
        }
        info!(
            "{}: estimated {} parking spaces",
            facility.facility_name, facility_spaces
        );
        total_spaces += facility_spaces;
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    fs_err::write(&output, serde_json::to_string_pretty(&collection)?)?;

    info!("Facilities processed: {}", candidates.len());
    info!("Total estimated parking spaces: {}", total_spaces);
    if !candidates.is_empty() {
        info!(
            "Average per facility: {:.1}",
            total_spaces as f64 / candidates.len() as f64
        );
    }
    println!("Wrote {}", output);
    Ok(())
}

fn estimate_one_area(
    facility: &Facility,
    area: &AnalyzedArea,
    imagery_dir: Option<&str>,
) -> Result<Vec<geojson::Feature>> {
    // Node-based areas have no polygon to fill.
    let geometry = match &area.geometry {
        Some(geometry) => geometry,
        None => return Ok(Vec::new()),
    };
    let centroid = LonLat::new(facility.facility_lon, facility.facility_lat);
    let parking_area = ParkingArea::new(
        Polygon::from_geojson(&geometry.value)?,
        area.capacity,
        VehicleClass::parse(&area.classification.vehicle_type),
        centroid,
    );

    // The tag may claim truck parking for a footprint too small to hold one bay.
    let vehicle_type = parking_area.size_checked_class();

    let mut capacity = parking_area.capacity;
    if capacity == 0 && facility.total_capacity > 0 {
        // The facility-level capacity tag covers all of its areas; split it
        // evenly.
        capacity = facility.total_capacity / facility.osm_parking_areas.len();
    }
    if capacity == 0 {
        capacity = parking_area.estimate_capacity_from_area(vehicle_type);
    }

    let rotation = imagery_dir.and_then(|dir| detect_rotation(dir, area.osm_id));

    let spaces = fit_spaces(
        &parking_area.polygon,
        capacity,
        vehicle_type,
        centroid.latitude,
        rotation,
    )?;

    Ok(spaces
        .into_iter()
        .map(|space| {
            let mut feature = space.to_geojson();
            let props = feature.properties.get_or_insert_with(serde_json::Map::new);
            props.insert(
                "feature_type".to_string(),
                "estimated_parking_space".into(),
            );
            props.insert(
                "facility_id".to_string(),
                facility.facility_id.clone().into(),
            );
            props.insert(
                "facility_name".to_string(),
                facility.facility_name.clone().into(),
            );
            props.insert("parking_area_osm_id".to_string(), area.osm_id.into());
            props.insert("parking_area_name".to_string(), area.name.clone().into());
            props.insert(
                "vehicle_label".to_string(),
                format!("Estimated {}", vehicle_type.label()).into(),
            );
            props.insert("color".to_string(), ESTIMATED_SPACE_COLOR.into());
            feature
        })
        .collect())
}

/// Look for a pre-fetched aerial photo of this parking area and recover the
/// dominant space orientation from it. A missing or unreadable image just
/// means no rotation.
fn detect_rotation(imagery_dir: &str, osm_id: i64) -> Option<Angle> {
    let path = Path::new(imagery_dir).join(format!("{}.png", osm_id));
    if !path.exists() {
        return None;
    }
    let img = match orientation::load_grayscale(&path) {
        Ok(img) => img,
        Err(err) => {
            warn!("Couldn't read {}: {}", path.display(), err);
            return None;
        }
    };
    match orientation::detect_orientation(&img) {
        Some(angle) => {
            info!("Detected rotation {:.1}° for area {}", angle, osm_id);
            Some(Angle::degrees(angle))
        }
        None => {
            info!(
                "Couldn't detect orientation for area {}, using the default",
                osm_id
            );
            None
        }
    }
}

#[derive(Deserialize)]
struct Analysis {
    facilities: Vec<Facility>,
}

#[derive(Deserialize)]
struct Facility {
    facility_id: String,
    facility_name: String,
    facility_lat: f64,
    facility_lon: f64,
    #[serde(default)]
    total_capacity: usize,
    #[serde(default)]
    individual_spaces_count: usize,
    #[serde(default)]
    osm_parking_areas: Vec<AnalyzedArea>,
}

#[derive(Deserialize)]
struct AnalyzedArea {
    osm_id: i64,
    name: String,
    #[serde(default)]
    capacity: usize,
    classification: Classification,
    geometry: Option<geojson::Geometry>,
}

#[derive(Deserialize)]
struct Classification {
    vehicle_type: String,
}
