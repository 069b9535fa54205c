//! Coordinate parsing and validation.
//!
//! Place coordinates arrive as text, either from the gazetteer CSV or from
//! the geocoder's JSON. This module turns that text into validated decimal
//! degrees and radians.
//!
//! # Example
//!
//! ```
//! use geodist::coord::{parse_radians, Coordinate};
//!
//! let lat = parse_radians("-12.5").unwrap();
//! assert!((lat - (-12.5f64).to_radians()).abs() < 1e-12);
//!
//! let lima = Coordinate::parse("-12.06", "-77.0375").unwrap();
//! assert_eq!(lima.lat, -12.06);
//!
//! assert!(parse_radians("north").is_err());
//! ```

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{GeoDistError, Result};

/// Parse decimal degrees from text.
///
/// Accepts an optionally signed, optionally fractional base-10 number.
/// Empty strings, non-numeric text and non-finite values (`NaN`, `inf`) are
/// rejected.
pub fn parse_degrees(text: &str) -> Result<f64> {
    if text.is_empty() {
        return Err(GeoDistError::Parse {
            input: text.to_string(),
            reason: "empty value".to_string(),
        });
    }

    let value: f64 = text.parse().map_err(|_| GeoDistError::Parse {
        input: text.to_string(),
        reason: "not a decimal number".to_string(),
    })?;

    if !value.is_finite() {
        return Err(GeoDistError::Parse {
            input: text.to_string(),
            reason: "not a finite number".to_string(),
        });
    }

    Ok(value)
}

/// Parse decimal degrees from text and convert them to radians.
pub fn parse_radians(text: &str) -> Result<f64> {
    parse_degrees(text).map(degrees_to_radians)
}

/// Convert decimal degrees to radians (`value * π / 180`).
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, checking both components are in range.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(GeoDistError::OutOfBounds { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Parse a coordinate from latitude and longitude text.
    pub fn parse(lat: &str, lon: &str) -> Result<Self> {
        Self::new(parse_degrees(lat)?, parse_degrees(lon)?)
    }

    /// Latitude and longitude in radians.
    pub fn to_radians(self) -> (f64, f64) {
        (degrees_to_radians(self.lat), degrees_to_radians(self.lon))
    }

    /// Great-circle distance to `other` in whole kilometers.
    pub fn distance_km(&self, other: &Coordinate) -> u32 {
        let (lat1, lon1) = self.to_radians();
        let (lat2, lon2) = other.to_radians();
        crate::haversine::distance_km(lat1, lon1, lat2, lon2)
    }
}
