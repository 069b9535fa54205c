//! Distance resolution strategies.
//!
//! A [`DistanceResolver`] answers "how far apart are these two places?" in
//! whole kilometers. Three strategies exist, selected at request time by a
//! [`Mode`]:
//!
//! | Mode | Resolver | Coordinates from |
//! |------|----------|------------------|
//! | `CSV` | [`GazetteerResolver`] | the preloaded [`Gazetteer`] |
//! | `API` | [`RemoteResolver`] | the remote [`Geocoder`] |
//! | `MOCK` | [`MockResolver`] | nowhere (random value in `0..100`) |
//!
//! The first two feed their coordinates into [`crate::haversine::distance_km`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use crate::error::{GeoDistError, Result};
use crate::gazetteer::Gazetteer;
use crate::geocoder::Geocoder;

/// Upper bound (exclusive) of the values produced by [`MockResolver`].
pub const MOCK_DISTANCE_BOUND: u32 = 100;

/// How place names are turned into coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Look places up in the preloaded gazetteer.
    Csv,
    /// Geocode places with the remote service.
    Api,
    /// Skip lookups and return a random distance.
    Mock,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 3] = [Mode::Csv, Mode::Api, Mode::Mock];

    /// The identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Csv => "CSV",
            Mode::Api => "API",
            Mode::Mock => "MOCK",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GeoDistError;

    /// Identifiers are matched exactly: `"csv"` is not a mode.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CSV" => Ok(Mode::Csv),
            "API" => Ok(Mode::Api),
            "MOCK" => Ok(Mode::Mock),
            _ => Err(GeoDistError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Computes the distance between two named places.
#[async_trait]
pub trait DistanceResolver: Send + Sync {
    /// The mode this resolver implements.
    fn mode(&self) -> Mode;

    /// Great-circle distance between `from` and `to` in whole kilometers.
    async fn distance(&self, from: &str, to: &str) -> Result<u32>;
}

/// Resolves places through the preloaded gazetteer.
#[derive(Debug, Clone)]
pub struct GazetteerResolver {
    gazetteer: Arc<Gazetteer>,
}

impl GazetteerResolver {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }
}

#[async_trait]
impl DistanceResolver for GazetteerResolver {
    fn mode(&self) -> Mode {
        Mode::Csv
    }

    async fn distance(&self, from: &str, to: &str) -> Result<u32> {
        let a = self.gazetteer.get(from)?;
        let b = self.gazetteer.get(to)?;

        let distance = a.coordinate.distance_km(&b.coordinate);
        tracing::debug!(from = from, to = to, distance_km = distance, "Gazetteer distance");
        Ok(distance)
    }
}

/// Resolves places through the remote geocoder.
///
/// Both names are geocoded concurrently; the first failure aborts the query.
#[derive(Debug, Clone)]
pub struct RemoteResolver {
    geocoder: Arc<Geocoder>,
}

impl RemoteResolver {
    pub fn new(geocoder: Arc<Geocoder>) -> Self {
        Self { geocoder }
    }
}

#[async_trait]
impl DistanceResolver for RemoteResolver {
    fn mode(&self) -> Mode {
        Mode::Api
    }

    async fn distance(&self, from: &str, to: &str) -> Result<u32> {
        let (a, b) = tokio::try_join!(
            self.geocoder.first_candidate(from),
            self.geocoder.first_candidate(to)
        )?;

        let distance = a.distance_km(&b);
        tracing::debug!(from = from, to = to, distance_km = distance, "Remote distance");
        Ok(distance)
    }
}

/// Returns a uniformly random distance in `0..100` without any lookup.
///
/// Meant for demos and front-end testing only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockResolver;

#[async_trait]
impl DistanceResolver for MockResolver {
    fn mode(&self) -> Mode {
        Mode::Mock
    }

    async fn distance(&self, _from: &str, _to: &str) -> Result<u32> {
        Ok(rand::thread_rng().gen_range(0..MOCK_DISTANCE_BOUND))
    }
}

/// Builds resolvers for a mode, sharing one gazetteer and one geocoder.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use geodist::{Gazetteer, Geocoder, GeocoderConfig, Resolvers};
///
/// let resolvers = Resolvers::new(
///     Arc::new(Gazetteer::from_path("worldcities.csv")?),
///     Arc::new(Geocoder::new(GeocoderConfig::default())?),
/// );
///
/// let resolver = resolvers.try_select("CSV")?;
/// let km = resolver.distance("London", "Paris").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Resolvers {
    gazetteer: Arc<Gazetteer>,
    geocoder: Arc<Geocoder>,
}

impl Resolvers {
    pub fn new(gazetteer: Arc<Gazetteer>, geocoder: Arc<Geocoder>) -> Self {
        Self {
            gazetteer,
            geocoder,
        }
    }

    /// The shared gazetteer.
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// The shared geocoder.
    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    /// Resolver for a parsed mode.
    pub fn for_mode(&self, mode: Mode) -> Box<dyn DistanceResolver> {
        match mode {
            Mode::Csv => Box::new(GazetteerResolver::new(Arc::clone(&self.gazetteer))),
            Mode::Api => Box::new(RemoteResolver::new(Arc::clone(&self.geocoder))),
            Mode::Mock => Box::new(MockResolver),
        }
    }

    /// Resolver for a mode identifier, or `None` if the identifier is unknown.
    pub fn select(&self, mode: &str) -> Option<Box<dyn DistanceResolver>> {
        mode.parse::<Mode>().ok().map(|mode| self.for_mode(mode))
    }

    /// Like [`Self::select`], but an unknown identifier is a
    /// [`GeoDistError::UnknownMode`].
    pub fn try_select(&self, mode: &str) -> Result<Box<dyn DistanceResolver>> {
        mode.parse::<Mode>().map(|mode| self.for_mode(mode))
    }
}
