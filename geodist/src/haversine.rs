//! Great-circle distance using the haversine formula.
//!
//! All resolvers funnel their coordinates into [`distance_km`], so its
//! numeric behaviour is the shared contract: inputs in radians, mean Earth
//! radius of 6371 km, result truncated toward zero.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest value [`distance_km`] can return (half the circumference).
pub const MAX_DISTANCE_KM: u32 = 20015; // floor(π * 6371)

/// Great-circle distance between two points, in whole kilometers.
///
/// Coordinates are in radians. The fractional part is truncated, not rounded.
///
/// # Example
///
/// ```
/// use geodist::haversine::distance_km;
///
/// let (lat1, lon1) = (51.5074f64.to_radians(), (-0.1278f64).to_radians());
/// let (lat2, lon2) = (48.8566f64.to_radians(), 2.3522f64.to_radians());
/// let d = distance_km(lat1, lon1, lat2, lon2);
/// assert!((338..=348).contains(&d));
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> u32 {
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c) as u32
}
