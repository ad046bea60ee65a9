//! Phase timing for validation runs
//!
//! Wall-clock spent per phase, reported alongside every result so that slow
//! providers or oversized star lists are visible to the caller. Timings are
//! informational only and never influence a verdict.

use std::time::Instant;

use serde::Serialize;

/// Milliseconds spent in each phase of one validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingsMs {
    /// Ephemeris and geomagnetic predictions
    pub prediction_ms: f64,
    /// Packing and signing
    pub crypto_ms: f64,
    /// Whole call, including scoring
    pub total_ms: f64,
}

/// Which bucket a measured span lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ephemeris and field model
    Prediction,
    /// Codec and authenticator
    Crypto,
}

/// Accumulates per-phase durations from a monotonic clock
#[derive(Debug)]
pub struct PhaseTimer {
    started: Instant,
    timings: TimingsMs,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::start()
    }
}

impl PhaseTimer {
    /// Start timing a call
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            timings: TimingsMs::default(),
        }
    }

    /// Run `f`, charging its duration to `phase`
    pub fn measure<T>(&mut self, phase: Phase, f: impl FnOnce() -> T) -> T {
        let begin = Instant::now();
        let value = f();
        let elapsed = elapsed_ms(begin);

        match phase {
            Phase::Prediction => self.timings.prediction_ms += elapsed,
            Phase::Crypto => self.timings.crypto_ms += elapsed,
        }
        value
    }

    /// Stop and report
    pub fn finish(mut self) -> TimingsMs {
        self.timings.total_ms = elapsed_ms(self.started);
        self.timings
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1_000.0
}
