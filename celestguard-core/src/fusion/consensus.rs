//! Weighted consensus over per-channel scores
//!
//! ```text
//! consensus = clamp(Σ(scoreᵢ × wᵢ) / Σwᵢ, 0, 100)     over wᵢ > 0
//! ```
//!
//! No positive weight means no consensus. The accumulator refuses to invent
//! a number in that case.

use crate::{
    constants::scoring::{MAX_SCORE_PCT, MIN_SCORE_PCT},
    errors::{GuardResult, IntegrityError},
};

/// Finished consensus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consensus {
    /// Weighted mean score, percent
    pub score_pct: f64,
    /// Contributions with positive weight
    pub sensor_count: usize,
}

/// Running weighted mean of channel scores
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedConsensus {
    weighted_sum: f64,
    weight_sum: f64,
    contributors: usize,
}

impl WeightedConsensus {
    /// Empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one channel; returns the weight actually applied
    ///
    /// Weights are clamped to `[0, 1]`. Zero, negative and non-finite
    /// weights are ignored, as are non-finite scores.
    pub fn add(&mut self, score_pct: f64, weight: f64) -> f64 {
        if !weight.is_finite() || !score_pct.is_finite() {
            return 0.0;
        }
        let weight = weight.clamp(0.0, 1.0);
        if weight > 0.0 {
            self.weighted_sum += score_pct.clamp(MIN_SCORE_PCT, MAX_SCORE_PCT) * weight;
            self.weight_sum += weight;
            self.contributors += 1;
        }
        weight
    }

    /// Contributions so far
    pub fn sensor_count(&self) -> usize {
        self.contributors
    }

    /// Resolve the consensus
    pub fn finish(&self) -> GuardResult<Consensus> {
        if self.contributors == 0 || self.weight_sum <= 0.0 {
            return Err(IntegrityError::NoContributingSensor);
        }
        Ok(Consensus {
            score_pct: (self.weighted_sum / self.weight_sum).clamp(MIN_SCORE_PCT, MAX_SCORE_PCT),
            sensor_count: self.contributors,
        })
    }
}

impl FromIterator<(f64, f64)> for WeightedConsensus {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut consensus = Self::new();
        for (score_pct, weight) in iter {
            consensus.add(score_pct, weight);
        }
        consensus
    }
}
