use anyhow::{Context, Result};
use geodist::{Gazetteer, Mode, Resolvers};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::GeocoderArgs;

#[derive(Serialize)]
struct DistanceOutput<'a> {
    from: &'a str,
    to: &'a str,
    mode: &'a str,
    distance: u32,
}

pub async fn run(
    gazetteer_path: PathBuf,
    geocoder: GeocoderArgs,
    from: String,
    to: String,
    mode: String,
    json: bool,
) -> Result<()> {
    let mode: Mode = mode.parse()?;

    // Only CSV mode needs the gazetteer on disk
    let gazetteer = if mode == Mode::Csv {
        Gazetteer::from_path(&gazetteer_path).with_context(|| {
            format!(
                "Failed to load gazetteer {}. Use --gazetteer or set GEODIST_GAZETTEER",
                gazetteer_path.display()
            )
        })?
    } else {
        Gazetteer::default()
    };

    let resolvers = Resolvers::new(Arc::new(gazetteer), Arc::new(geocoder.build()?));

    let distance = resolvers
        .for_mode(mode)
        .distance(&from, &to)
        .await
        .with_context(|| format!("Failed to compute distance from {} to {}", from, to))?;

    if json {
        let output = DistanceOutput {
            from: &from,
            to: &to,
            mode: mode.as_str(),
            distance,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", distance);
    }

    Ok(())
}
