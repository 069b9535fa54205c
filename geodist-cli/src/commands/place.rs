use anyhow::{Context, Result};
use geodist::Gazetteer;
use std::path::PathBuf;

pub fn run(gazetteer_path: PathBuf, name: String, json: bool) -> Result<()> {
    let gazetteer = Gazetteer::from_path(&gazetteer_path).with_context(|| {
        format!(
            "Failed to load gazetteer {}. Use --gazetteer or set GEODIST_GAZETTEER",
            gazetteer_path.display()
        )
    })?;

    let place = gazetteer.get(&name)?;

    if json {
        println!("{}", serde_json::to_string(place)?);
        return Ok(());
    }

    println!("Place: {}", place.name);
    if place.ascii_name != place.name {
        println!("  ASCII name: {}", place.ascii_name);
    }
    println!(
        "  Location: {:.4}°, {:.4}°",
        place.coordinate.lat, place.coordinate.lon
    );
    println!(
        "  Country: {} ({}/{})",
        place.country, place.iso2, place.iso3
    );
    if !place.admin_name.is_empty() {
        println!("  Region: {}", place.admin_name);
    }
    if !place.capital.as_str().is_empty() {
        println!("  Capital: {}", place.capital.as_str());
    }
    match place.population {
        Some(population) => println!("  Population: {}", population),
        None => println!("  Population: unknown"),
    }
    println!("  ID: {}", place.id);

    Ok(())
}
