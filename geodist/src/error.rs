//! Error types for the geodist library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving distances between places.
#[derive(Error, Debug)]
pub enum GeoDistError {
    /// Coordinate text is not a finite decimal number.
    #[error("Invalid coordinate {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// Parsed coordinates fall outside the valid range.
    #[error("Coordinates out of bounds: lat={lat}, lon={lon} (valid: lat ±90°, lon ±180°)")]
    OutOfBounds { lat: f64, lon: f64 },

    /// IO error when reading the gazetteer source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The gazetteer source is not readable CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A gazetteer row could not be turned into a place record.
    #[error("Malformed gazetteer row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// The gazetteer file does not exist.
    #[error("Gazetteer file not found: {path}")]
    GazetteerNotFound { path: PathBuf },

    /// The place is absent from the gazetteer.
    #[error("Place not found: {name}")]
    NotFound { name: String },

    /// The outbound geocoding request failed.
    #[error("Geocoding request for {name:?} failed: {reason}")]
    Network { name: String, reason: String },

    /// The geocoding response could not be used.
    #[error("Invalid geocoding response for {name:?}: {reason}")]
    Decode { name: String, reason: String },

    /// The requested resolution mode does not exist.
    #[error("Unknown mode: {mode:?} (expected one of CSV, API, MOCK)")]
    UnknownMode { mode: String },

    /// The geocoder client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using [`GeoDistError`].
pub type Result<T> = std::result::Result<T, GeoDistError>;
