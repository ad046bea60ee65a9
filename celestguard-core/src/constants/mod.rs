//! Constants for CelestGuard Core
//!
//! Every tunable number the engine relies on lives here, grouped by domain
//! and named with its unit.
//!
//! ## Organization
//!
//! - **Scoring**: status thresholds and signature geometry
//! - **Geomagnetic**: reference field strengths for the dipole model
//! - **Astronomy**: visibility and twilight limits
//! - **Codec**: binary message layout

/// Integrity score thresholds and signature sizes.
pub mod scoring;

/// Reference values for the simplified geomagnetic field.
pub mod geomagnetic;

/// Star visibility and twilight limits.
pub mod astronomy;

/// Fixed message layout for signing.
pub mod codec;

pub use scoring::{DEFAULT_DEGRADED_SCORE_PCT, DEFAULT_NOMINAL_SCORE_PCT, SIGNATURE_BYTES};

pub use geomagnetic::{EARTH_REFERENCE_RADIUS_M, NOMINAL_FIELD_INTENSITY_NT};

pub use astronomy::{DEFAULT_STAR_MIN_ELEVATION_DEG, NAUTICAL_TWILIGHT_SUN_ELEVATION_DEG};

pub use codec::MESSAGE_BYTES;
