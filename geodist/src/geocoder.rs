//! Remote geocoding client.
//!
//! Resolves free-text place names to candidate coordinates using a
//! Nominatim-compatible search endpoint (`GET {base_url}?q={name}&format=json`).
//! The response is a JSON array of objects exposing at least `lat` and `lon`
//! as decimal-degree strings.
//!
//! Each lookup is a single attempt bounded by a timeout. Nothing is cached.
//!
//! ```ignore
//! use geodist::geocoder::{Geocoder, GeocoderConfig};
//!
//! let geocoder = Geocoder::new(GeocoderConfig::default().with_timeout(5))?;
//! let lima = geocoder.first_candidate("Lima, Peru").await?;
//! println!("{} {}", lima.lat, lima.lon);
//! ```

use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer, Serialize};

use crate::coord::Coordinate;
use crate::error::{GeoDistError, Result};

/// Public OpenStreetMap Nominatim search endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default timeout for outbound requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One candidate location returned by the geocoder.
///
/// Coordinates are kept as text until they are needed, so a malformed value
/// surfaces as a parse error for the query that uses it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeocodeCandidate {
    /// Latitude in decimal degrees.
    #[serde(deserialize_with = "string_or_number")]
    pub lat: String,
    /// Longitude in decimal degrees.
    #[serde(deserialize_with = "string_or_number")]
    pub lon: String,
    /// Human-readable label, if the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl GeocodeCandidate {
    /// Parse and validate this candidate's coordinates.
    pub fn coordinate(&self) -> Result<Coordinate> {
        Coordinate::parse(&self.lat, &self.lon)
    }
}

/// Accept `"51.5"` as well as `51.5`; some Nominatim mirrors emit numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Configuration for the remote geocoder.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Search endpoint; `q` and `format` are appended as query parameters.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("geodist/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GeocoderConfig {
    /// Create a configuration pointing at a custom search endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GEODIST_GEOCODER_URL` | Search endpoint | Nominatim |
    /// | `GEODIST_GEOCODER_TIMEOUT` | Timeout in seconds | 10 |
    /// | `GEODIST_USER_AGENT` | `User-Agent` header | `geodist/<version>` |
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GEODIST_GEOCODER_URL") {
            config.base_url = url;
        }
        if let Some(timeout) = std::env::var("GEODIST_GEOCODER_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = timeout;
        }
        if let Ok(agent) = std::env::var("GEODIST_USER_AGENT") {
            config.user_agent = agent;
        }

        config
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP client for a Nominatim-compatible search endpoint.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: Url,
}

impl Geocoder {
    /// Create a geocoder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeoDistError::Config`] if the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GeoDistError::Config(format!(
                "Invalid geocoder URL {:?}: {}",
                config.base_url, e
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| GeoDistError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// The search endpoint this geocoder queries.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the search URL for `name`, percent-encoding it as the `q` parameter.
    pub fn search_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", name)
            .append_pair("format", "json");
        url
    }

    /// Look up all candidates for a place name.
    ///
    /// An empty list is a valid answer: the service knows no such place.
    ///
    /// # Errors
    ///
    /// - [`GeoDistError::Network`] if the request fails, times out or returns
    ///   a non-success status
    /// - [`GeoDistError::Decode`] if the body is not a JSON array of candidates
    pub async fn geocode(&self, name: &str) -> Result<Vec<GeocodeCandidate>> {
        let url = self.search_url(name);
        let start = Instant::now();

        tracing::debug!(name = name, url = %url, "Geocoding request");

        let network_error = |reason: String| GeoDistError::Network {
            name: name.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_error(format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        let candidates: Vec<GeocodeCandidate> =
            serde_json::from_slice(&body).map_err(|e| GeoDistError::Decode {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            name = name,
            candidates = candidates.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Geocoding response"
        );

        Ok(candidates)
    }

    /// Look up a place and return the coordinates of its first candidate.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Self::geocode`], returns
    /// [`GeoDistError::Decode`] when there are no candidates and
    /// [`GeoDistError::Parse`] / [`GeoDistError::OutOfBounds`] when the first
    /// candidate's coordinates are invalid.
    pub async fn first_candidate(&self, name: &str) -> Result<Coordinate> {
        let candidates = self.geocode(name).await?;
        let first = candidates.first().ok_or_else(|| GeoDistError::Decode {
            name: name.to_string(),
            reason: "no candidates returned".to_string(),
        })?;
        first.coordinate()
    }
}
