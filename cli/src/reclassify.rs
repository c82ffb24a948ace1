use anyhow::Result;
use geojson::FeatureCollection;

use parking_model::{reclassify_collection, TRUCK_MIN_LENGTH, TRUCK_MIN_WIDTH};

pub fn run(input: String, output: String) -> Result<()> {
    let mut collection: FeatureCollection = serde_json::from_slice(&fs_err::read(&input)?)?;
    info!("Loaded {} parking spaces", collection.features.len());
    info!(
        "Classification criteria (CROW ASVV 2021): truck when width >= {} and length >= {}",
        TRUCK_MIN_WIDTH, TRUCK_MIN_LENGTH
    );

    let stats = reclassify_collection(&mut collection);
    info!("Truck parking spaces: {}", stats.trucks);
    info!("Car parking spaces: {}", stats.cars);
    info!("Point geometries: {}", stats.points);
    info!(
        "Polygon geometries: {}",
        collection.features.len() - stats.points
    );

    fs_err::write(&output, serde_json::to_string_pretty(&collection)?)?;
    println!("Wrote {}", output);
    Ok(())
}
