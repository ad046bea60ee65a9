//! Geomagnetic Reference Values
//!
//! The field model is an axial dipole with a longitude wobble. These
//! numbers give it realistic magnitudes; they are not fitted to IGRF/WMM.

/// Horizontal field strength at the magnetic equator, sea level (nT).
///
/// Real values range from ~25 000 nT (South Atlantic Anomaly) to ~40 000 nT.
pub const EQUATORIAL_FIELD_NT: f64 = 30_000.0;

/// Total intensity treated as full confidence (nT).
///
/// Mid-latitude field strength. Weaker fields are easier to swamp with
/// local interference, so heading confidence scales with intensity / this.
pub const NOMINAL_FIELD_INTENSITY_NT: f64 = 50_000.0;

/// Relative amplitude of the east-component longitude perturbation.
pub const EAST_PERTURBATION_RATIO: f64 = 0.08;

/// Reference radius for the cubic altitude fall-off (m).
///
/// Source: IGRF reference sphere, 6371.2 km
pub const EARTH_REFERENCE_RADIUS_M: f64 = 6_371_200.0;

/// Model epoch, 2025-01-01T00:00:00Z, in milliseconds since the Unix epoch.
pub const MODEL_EPOCH_UNIX_MS: i64 = 1_735_689_600_000;

/// Mean Julian year in milliseconds.
pub const MS_PER_JULIAN_YEAR: f64 = 365.25 * 86_400_000.0;

/// Relative change of field intensity per year since the epoch.
///
/// The dipole moment has been decaying by roughly 5% per century.
pub const SECULAR_VARIATION_PER_YEAR: f64 = -0.0005;

/// Confidence multiplier applied by noise injection.
pub const NOISE_CONFIDENCE_FACTOR: f64 = 0.95;
