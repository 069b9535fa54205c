//! # geodist - Distance Between Named Places
//!
//! Answers "how far apart are these two places?" in whole kilometers, using
//! one of three interchangeable strategies.
//!
//! ## Features
//!
//! - **Gazetteer**: Exact-match lookups in a preloaded world-cities CSV
//! - **Geocoder**: Free-text lookups against a Nominatim-compatible service
//! - **Mock**: Random distances for demos and front-end testing
//! - **Haversine**: One shared great-circle computation, truncated to whole km
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use geodist::{Gazetteer, Geocoder, GeocoderConfig, Resolvers};
//!
//! let gazetteer = Arc::new(Gazetteer::from_path("worldcities.csv")?);
//! let geocoder = Arc::new(Geocoder::new(GeocoderConfig::from_env())?);
//! let resolvers = Resolvers::new(gazetteer, geocoder);
//!
//! let km = resolvers.try_select("CSV")?.distance("London", "Paris").await?;
//! println!("London to Paris: {} km", km);
//! ```
//!
//! ## Distance Model
//!
//! Distances are computed on a sphere with the mean Earth radius
//! (6371 km) and truncated, so London to Paris is `343`, never `344`.
//!
//! ## Data Sources
//!
//! - World cities dataset: <https://simplemaps.com/data/world-cities>
//! - Nominatim search API: <https://nominatim.org/release-docs/latest/api/Search/>

pub mod coord;
pub mod error;
pub mod gazetteer;
pub mod geocoder;
pub mod haversine;
pub mod resolver;

// Re-export main types at crate root for convenience
pub use coord::Coordinate;
pub use error::{GeoDistError, Result};
pub use gazetteer::{Capital, Gazetteer, PlaceRecord};
pub use geocoder::{GeocodeCandidate, Geocoder, GeocoderConfig, DEFAULT_GEOCODER_URL};
pub use haversine::{distance_km, EARTH_RADIUS_KM, MAX_DISTANCE_KM};
pub use resolver::{
    DistanceResolver, GazetteerResolver, MockResolver, Mode, RemoteResolver, Resolvers,
};
