//! Integrity validation engine for CelestGuard
//!
//! Authenticates a claimed navigation state (position and time) by predicting
//! what the sky and the magnetic field should look like from there, signing
//! both the prediction and the sensor's actual report, and comparing the
//! signatures bit by bit.
//!
//! Key properties:
//! - Keyed HMAC-SHA-512 signatures, scored by Hamming distance
//! - Sun, star and magnetometer channels fused by weighted consensus
//! - Immutable engine, safe to share across threads
//!
//! ```rust
//! use celestguard_core::{IntegrityStatus, IntegrityValidator, NavigationState, ValidatorConfig};
//! use chrono::{TimeZone, Utc};
//!
//! let validator = IntegrityValidator::new("mission-key", ValidatorConfig::default())?;
//! let state = NavigationState::new(
//!     Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap(),
//!     48.8566,
//!     2.3522,
//!     35.0,
//! );
//!
//! // A sun sensor that agrees exactly with the prediction
//! let observed = validator.predict_sun(&state)?;
//! let result = validator.validate(&state, &observed)?;
//!
//! assert_eq!(result.status(), IntegrityStatus::Nominal);
//! assert_eq!(result.hamming_distance_bits(), Some(0));
//! # Ok::<(), celestguard_core::IntegrityError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub mod angles;
pub mod auth;
pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fusion;
pub mod geomagnetic;
pub mod result;
pub mod scorer;
pub mod simulate;
pub mod stars;
pub mod timing;
pub mod traits;
pub mod types;
pub mod validator;

// Public API
pub use auth::{Authenticator, Signature, SigningKey};
pub use codec::{pack, FixedMessage};
pub use config::ValidatorConfig;
pub use errors::{GuardResult, IntegrityError};
pub use fusion::{
    MultiSensorFusion, MultiSensorSignatureDetail, SensorChannel, SensorEvidence, SensorKind,
};
pub use geomagnetic::{GeomagneticModel, MagneticField};
pub use result::{BearingDelta, IntegrityResult};
pub use scorer::{hamming_distance, score, score_hex, IntegrityStatus, SignatureScore, Thresholds};
pub use simulate::{simulate_observations, SimulationProfile};
pub use stars::{is_night_elevation, StarObservation, StarVisibility, VisibleStars};
pub use timing::TimingsMs;
pub use types::{
    CelestialObservation, MagneticHeadingObservation, MultiSensorObservations, NavigationState,
    StarObservationInput,
};
pub use validator::IntegrityValidator;

pub use celestguard_ephemeris::{
    EphemerisProvider, LowPrecisionEphemeris, Observer, Refraction, StarCatalog,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
