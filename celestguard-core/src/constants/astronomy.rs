//! Astronomy Limits

/// Sun elevation (°) below which it counts as night.
///
/// Nautical twilight ends at -12°; beyond it the bright stars are usable
/// and the sun is no longer a credible sensor target.
pub const NAUTICAL_TWILIGHT_SUN_ELEVATION_DEG: f64 = -12.0;

/// Default minimum elevation (°) for a star to count as visible.
///
/// Low stars suffer from extinction and uncertain refraction.
pub const DEFAULT_STAR_MIN_ELEVATION_DEG: f64 = 10.0;

/// Elevation span (°) above the minimum over which star confidence ramps to 1.
pub const STAR_ELEVATION_RAMP_DEG: f64 = 60.0;

/// Magnitude divisor for the star brightness term.
pub const STAR_MAGNITUDE_SCALE: f64 = 2.0;

/// Floor of the star brightness term.
pub const STAR_MIN_MAGNITUDE_CONFIDENCE: f64 = 0.3;
