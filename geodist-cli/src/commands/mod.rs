pub mod distance;
pub mod geocode;
pub mod place;

use anyhow::{Context, Result};
use geodist::{Geocoder, GeocoderConfig};

/// Geocoder settings shared by the subcommands that go over the network.
pub struct GeocoderArgs {
    pub url: String,
    pub timeout_secs: u64,
}

impl GeocoderArgs {
    /// Build a geocoder; `GEODIST_USER_AGENT` is still honoured.
    pub fn build(self) -> Result<Geocoder> {
        let mut config = GeocoderConfig::from_env().with_timeout(self.timeout_secs);
        config.base_url = self.url;
        Geocoder::new(config).context("Failed to create geocoder")
    }
}
