use anyhow::{Context, Result};

use super::GeocoderArgs;

pub async fn run(geocoder: GeocoderArgs, name: String, json: bool) -> Result<()> {
    let geocoder = geocoder.build()?;

    let candidates = geocoder
        .geocode(&name)
        .await
        .with_context(|| format!("Failed to geocode {}", name))?;

    if json {
        println!("{}", serde_json::to_string(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No candidates for {}", name);
        return Ok(());
    }

    for (i, candidate) in candidates.iter().enumerate() {
        let label = candidate.display_name.as_deref().unwrap_or("");
        // The first candidate is the one API mode uses
        let marker = if i == 0 { "*" } else { " " };
        println!("{} {:>12} {:>13}  {}", marker, candidate.lat, candidate.lon, label);
    }

    Ok(())
}
