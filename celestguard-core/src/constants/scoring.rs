//! Scoring Constants
//!
//! Thresholds map an integrity percentage onto a status. Because HMAC output
//! is avalanche-sensitive, a single mismatched input bit already costs about
//! half the signature, so anything short of an exact match lands near 50%.
//! The thresholds mostly matter when signatures are compared across
//! truncated or partially trusted channels.

/// Minimum score (%) classified as nominal.
pub const DEFAULT_NOMINAL_SCORE_PCT: f64 = 95.0;

/// Minimum score (%) classified as degraded. Below this the result is anomalous.
pub const DEFAULT_DEGRADED_SCORE_PCT: f64 = 80.0;

/// Signature length in bytes (HMAC-SHA-512 output).
pub const SIGNATURE_BYTES: usize = 64;

/// Upper bound of any integrity score (%).
pub const MAX_SCORE_PCT: f64 = 100.0;

/// Lower bound of any integrity score (%).
pub const MIN_SCORE_PCT: f64 = 0.0;
