//! Integrity Scorer
//!
//! Bit-level comparison of an expected and an observed signature:
//!
//! ```text
//! distance = Σ popcount(expected[i] XOR observed[i])
//! score    = clamp((1 - distance / total_bits) × 100, 0, 100)
//! ```
//!
//! Status comes from a two-rung ladder evaluated high to low:
//!
//! ```text
//! score >= nominal   → Nominal
//! score >= degraded  → Degraded
//! otherwise          → Anomalous
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    constants::scoring::{
        DEFAULT_DEGRADED_SCORE_PCT, DEFAULT_NOMINAL_SCORE_PCT, MAX_SCORE_PCT, MIN_SCORE_PCT,
    },
    errors::{GuardResult, IntegrityError},
    traits::Validatable,
};

/// Discrete integrity verdict, ordered best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityStatus {
    /// Prediction and observation agree
    Nominal,
    /// Partial agreement
    Degraded,
    /// Disagreement, treat the navigation state as suspect
    Anomalous,
}

impl IntegrityStatus {
    /// Lowercase name as used at the boundary
    pub const fn name(&self) -> &'static str {
        match self {
            IntegrityStatus::Nominal => "nominal",
            IntegrityStatus::Degraded => "degraded",
            IntegrityStatus::Anomalous => "anomalous",
        }
    }
}

impl core::fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Score thresholds for status classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Minimum score for `Nominal`, percent
    pub nominal_score_pct: f64,
    /// Minimum score for `Degraded`, percent
    pub degraded_score_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            nominal_score_pct: DEFAULT_NOMINAL_SCORE_PCT,
            degraded_score_pct: DEFAULT_DEGRADED_SCORE_PCT,
        }
    }
}

impl Thresholds {
    /// Create thresholds, requiring `0 <= degraded <= nominal <= 100`
    pub fn new(nominal_score_pct: f64, degraded_score_pct: f64) -> GuardResult<Self> {
        let thresholds = Self {
            nominal_score_pct,
            degraded_score_pct,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check ordering and range
    pub fn validate(&self) -> GuardResult<()> {
        let in_range = |v: f64| v.is_valid() && (MIN_SCORE_PCT..=MAX_SCORE_PCT).contains(&v);

        if !in_range(self.nominal_score_pct) || !in_range(self.degraded_score_pct) {
            return Err(IntegrityError::config("thresholds must lie within [0, 100]"));
        }
        if self.degraded_score_pct > self.nominal_score_pct {
            return Err(IntegrityError::config(
                "degraded threshold must not exceed nominal threshold",
            ));
        }
        Ok(())
    }

    /// Map a score onto a status
    pub fn classify(&self, score_pct: f64) -> IntegrityStatus {
        if score_pct >= self.nominal_score_pct {
            IntegrityStatus::Nominal
        } else if score_pct >= self.degraded_score_pct {
            IntegrityStatus::Degraded
        } else {
            IntegrityStatus::Anomalous
        }
    }
}

/// Outcome of one signature comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureScore {
    /// Number of differing bits
    pub hamming_distance_bits: u32,
    /// Agreement percentage in `[0, 100]`
    pub integrity_score_pct: f64,
}

/// Count differing bits between two equal-length byte strings
pub fn hamming_distance(expected: &[u8], observed: &[u8]) -> GuardResult<u32> {
    if expected.len() != observed.len() {
        return Err(IntegrityError::LengthMismatch {
            expected: expected.len(),
            observed: observed.len(),
        });
    }

    Ok(expected
        .iter()
        .zip(observed)
        .map(|(a, b)| (a ^ b).count_ones())
        .sum())
}

/// Compare two signatures
pub fn score(expected: &[u8], observed: &[u8]) -> GuardResult<SignatureScore> {
    let distance = hamming_distance(expected, observed)?;
    if expected.is_empty() {
        return Err(IntegrityError::invalid("signature", "empty signature"));
    }

    let total_bits = (expected.len() * 8) as f64;
    let pct = ((1.0 - f64::from(distance) / total_bits) * 100.0).clamp(MIN_SCORE_PCT, MAX_SCORE_PCT);

    Ok(SignatureScore {
        hamming_distance_bits: distance,
        integrity_score_pct: pct,
    })
}

/// Compare two hex-encoded signatures
pub fn score_hex(expected_hex: &str, observed_hex: &str) -> GuardResult<SignatureScore> {
    let expected = hex::decode(expected_hex)
        .map_err(|_| IntegrityError::invalid("expected_signature_hex", "not valid hex"))?;
    let observed = hex::decode(observed_hex)
        .map_err(|_| IntegrityError::invalid("observed_signature_hex", "not valid hex"))?;
    score(&expected, &observed)
}
