//! Basic example demonstrating geodist library usage.
//!
//! Run with: cargo run --example basic -- /path/to/worldcities.csv

use geodist::{Gazetteer, GeoDistError};
use std::env;

fn main() -> Result<(), GeoDistError> {
    // Get gazetteer path from command line
    let path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/worldcities.csv");
        std::process::exit(1);
    });

    let gazetteer = Gazetteer::from_path(&path)?;

    // Some well-known city pairs
    let pairs = [
        ("London", "Paris"),
        ("Tokyo", "Sydney"),
        ("Lima", "Atlantis"),
    ];

    println!("Distances (gazetteer, truncated km):");
    println!("{:-<50}", "");

    for (from, to) in &pairs {
        match (gazetteer.get(from), gazetteer.get(to)) {
            (Ok(a), Ok(b)) => {
                println!("{} -> {}: {} km", from, to, a.coordinate.distance_km(&b.coordinate));
            }
            (Err(e), _) | (_, Err(e)) => {
                println!("{} -> {}: {}", from, to, e);
            }
        }
    }

    println!("\nGazetteer: {} places, {} duplicate rows", gazetteer.len(), gazetteer.duplicates());

    Ok(())
}
