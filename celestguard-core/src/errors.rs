//! Error Types for Integrity Validation
//!
//! ## Error Categories
//!
//! ### Comparison Failures
//! - `LengthMismatch`: two signatures of different length were compared.
//!   Never truncated or padded, the comparison is simply refused.
//!
//! ### Fusion Failures
//! - `NoContributingSensor`: every channel was absent or carried zero weight,
//!   so there is nothing to build a consensus from. Reporting 0% or 100% here
//!   would be a lie in one direction or the other.
//!
//! ### Input Problems
//! - `InvalidInput`: NaN/infinite values, latitudes or elevations out of range,
//!   confidences outside `[0, 1]`, timestamps before the Unix epoch, bad hex.
//! - `UnknownStar`: a star observation names an id the catalog does not have.
//!
//! ### Setup Problems
//! - `InvalidConfig`: thresholds out of order, an empty key, unreadable JSON.
//!
//! ## Error Handling Strategy
//!
//! Every computation is deterministic, so none of these are worth retrying.
//!
//! ```rust
//! use celestguard_core::{IntegrityError, IntegrityValidator, MultiSensorObservations, NavigationState, ValidatorConfig};
//! use chrono::{TimeZone, Utc};
//!
//! let validator = IntegrityValidator::new("mission-key", ValidatorConfig::default())?;
//! let state = NavigationState::new(Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap(), 48.8566, 2.3522, 35.0);
//!
//! match validator.validate_multi_sensor(&state, &MultiSensorObservations::default()) {
//!     Err(IntegrityError::NoContributingSensor) => {
//!         // Nothing to fuse, ask the platform for star or compass fixes
//!     }
//!     Err(IntegrityError::InvalidInput { field, .. }) => {
//!         // Upstream produced garbage in `field`
//!         let _ = field;
//!     }
//!     _ => {}
//! }
//! # Ok::<(), IntegrityError>(())
//! ```

use thiserror_no_std::Error;

/// Result type for integrity operations
pub type GuardResult<T> = Result<T, IntegrityError>;

/// Integrity validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    /// Signatures of unequal byte length were compared
    #[error("Signature length mismatch: expected {expected} bytes, observed {observed} bytes")]
    LengthMismatch {
        /// Byte length of the expected signature
        expected: usize,
        /// Byte length of the observed signature
        observed: usize,
    },

    /// Fusion found no channel with positive weight
    #[error("No sensor contributed positive weight to the consensus")]
    NoContributingSensor,

    /// Malformed navigation or observation value
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Star id not present in the catalog
    #[error("Unknown star id: {id}")]
    UnknownStar {
        /// The id that failed to resolve
        id: String,
    },

    /// Validator configuration rejected at construction
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it
        reason: String,
    },
}

impl IntegrityError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        IntegrityError::InvalidInput { field, reason }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        IntegrityError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
