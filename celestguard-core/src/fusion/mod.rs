//! Multi-Sensor Fusion
//!
//! ## Overview
//!
//! One spoofed channel is easy. A false position has to be made consistent
//! with the sun, every visible star and the local magnetic field at once,
//! which is much harder. Fusion runs the single-sensor pipeline per channel
//! and combines the per-channel scores:
//!
//! ```text
//! Sun ───────────┐
//! Star 1..N ─────┼─→ predict → sign both → score ─→ Σ(scoreᵢ·wᵢ) / Σwᵢ
//! Magnetometer ──┘
//! ```
//!
//! ## Weights
//!
//! | Channel      | Weight                          |
//! |--------------|---------------------------------|
//! | Sun          | 1.0                             |
//! | Star         | reported confidence, `[0, 1]`   |
//! | Magnetometer | reported confidence, `[0, 1]`   |
//!
//! A zero-weight channel is still validated and listed in the evidence
//! trail, it just does not move the consensus.
//!
//! ## Ordering
//!
//! Evidence is always sun, then stars in input order, then magnetometer.
//!
//! ## Night
//!
//! The sun channel only runs when a sun observation is supplied. At night
//! (sun below nautical twilight) callers normally leave it out and rely on
//! stars and the magnetometer; the fusion records whether the gate held.

pub mod consensus;
mod engine;

pub use consensus::{Consensus, WeightedConsensus};

use serde::Serialize;

use crate::{
    result::BearingDelta,
    scorer::IntegrityStatus,
    types::{CelestialObservation, MagneticHeadingObservation, MultiSensorObservations, StarObservationInput},
};

/// Weight of the solar channel
pub const SUN_WEIGHT: f64 = 1.0;

/// Sensor modality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Sun tracker
    Sun,
    /// Star tracker
    Star,
    /// Compass
    Magnetometer,
}

impl SensorKind {
    /// Lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::Sun => "sun",
            SensorKind::Star => "star",
            SensorKind::Magnetometer => "magnetometer",
        }
    }
}

/// One input channel of a fusion run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorChannel<'a> {
    /// Observed solar bearing
    Sun(&'a CelestialObservation),
    /// Observed star bearing
    Star(&'a StarObservationInput),
    /// Observed compass heading
    Magnetometer(&'a MagneticHeadingObservation),
}

impl SensorChannel<'_> {
    /// Modality of this channel
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorChannel::Sun(_) => SensorKind::Sun,
            SensorChannel::Star(_) => SensorKind::Star,
            SensorChannel::Magnetometer(_) => SensorKind::Magnetometer,
        }
    }

    /// Consensus weight, `[0, 1]`
    pub fn weight(&self) -> f64 {
        let raw = match self {
            SensorChannel::Sun(_) => SUN_WEIGHT,
            SensorChannel::Star(star) => star.confidence,
            SensorChannel::Magnetometer(heading) => heading.confidence,
        };
        if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl MultiSensorObservations {
    /// Supplied channels in fusion order
    pub fn channels(&self) -> impl Iterator<Item = SensorChannel<'_>> {
        self.sun
            .iter()
            .map(SensorChannel::Sun)
            .chain(self.stars.iter().map(SensorChannel::Star))
            .chain(self.magnetometer.iter().map(SensorChannel::Magnetometer))
    }
}

/// Predicted and observed payloads of one validated channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "sensor", rename_all = "lowercase")]
pub enum SensorEvidence {
    /// Solar bearing
    Sun {
        /// From the ephemeris
        predicted: CelestialObservation,
        /// From the sensor
        observed: CelestialObservation,
        /// Observed minus predicted
        delta: BearingDelta,
    },
    /// Stellar bearing
    Star {
        /// From the ephemeris and catalog
        predicted: CelestialObservation,
        /// From the sensor
        observed: CelestialObservation,
        /// Observed minus predicted
        delta: BearingDelta,
    },
    /// Compass heading
    Magnetometer {
        /// From the geomagnetic model
        predicted: MagneticHeadingObservation,
        /// From the sensor
        observed: MagneticHeadingObservation,
        /// Wrapped heading difference, degrees
        delta: f64,
    },
}

impl SensorEvidence {
    /// Modality of this evidence
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorEvidence::Sun { .. } => SensorKind::Sun,
            SensorEvidence::Star { .. } => SensorKind::Star,
            SensorEvidence::Magnetometer { .. } => SensorKind::Magnetometer,
        }
    }

    /// Scalar disagreement in degrees
    ///
    /// Great-circle separation for bearings, signed heading difference for
    /// the magnetometer.
    pub fn delta_deg(&self) -> f64 {
        match self {
            SensorEvidence::Sun { delta, .. } | SensorEvidence::Star { delta, .. } => delta.angle_deg,
            SensorEvidence::Magnetometer { delta, .. } => *delta,
        }
    }
}

/// One channel's contribution, fully auditable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSensorSignatureDetail {
    pub(crate) id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(flatten)]
    pub(crate) evidence: SensorEvidence,
    pub(crate) delta_deg: f64,
    pub(crate) confidence: f64,
    pub(crate) weight: f64,
    pub(crate) expected_signature_hex: String,
    pub(crate) observed_signature_hex: String,
    pub(crate) hamming_distance_bits: u32,
    pub(crate) integrity_score_pct: f64,
    pub(crate) status: IntegrityStatus,
}

impl MultiSensorSignatureDetail {
    /// Modality
    pub fn kind(&self) -> SensorKind {
        self.evidence.kind()
    }

    /// Channel identifier: `sun`, a star id, or `magnetometer`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, stars only
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Predicted and observed payloads
    pub fn evidence(&self) -> &SensorEvidence {
        &self.evidence
    }

    /// Scalar disagreement, degrees
    pub fn delta_deg(&self) -> f64 {
        self.delta_deg
    }

    /// Reported confidence, `[0, 1]`
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Consensus weight, `[0, 1]`
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Signature over the prediction, lowercase hex
    pub fn expected_signature_hex(&self) -> &str {
        &self.expected_signature_hex
    }

    /// Signature over the observation, lowercase hex
    pub fn observed_signature_hex(&self) -> &str {
        &self.observed_signature_hex
    }

    /// Differing signature bits
    pub fn hamming_distance_bits(&self) -> u32 {
        self.hamming_distance_bits
    }

    /// Channel score, percent
    pub fn integrity_score_pct(&self) -> f64 {
        self.integrity_score_pct
    }

    /// Channel verdict under the validator's thresholds
    pub fn status(&self) -> IntegrityStatus {
        self.status
    }

    /// True when this channel moved the consensus
    pub fn contributed(&self) -> bool {
        self.weight > 0.0
    }
}

/// Fused verdict and its evidence trail
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSensorFusion {
    pub(crate) consensus_score_pct: f64,
    pub(crate) sensor_count: usize,
    pub(crate) signatures: Vec<MultiSensorSignatureDetail>,
    pub(crate) night: bool,
}

impl MultiSensorFusion {
    /// Weighted consensus score, percent
    pub fn consensus_score_pct(&self) -> f64 {
        self.consensus_score_pct
    }

    /// Channels with positive weight
    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    /// Every validated channel, in fusion order
    pub fn signatures(&self) -> &[MultiSensorSignatureDetail] {
        &self.signatures
    }

    /// Sun was below nautical twilight at the claimed state
    pub fn night(&self) -> bool {
        self.night
    }

    /// Evidence for one channel by id
    pub fn signature(&self, id: &str) -> Option<&MultiSensorSignatureDetail> {
        self.signatures.iter().find(|d| d.id.eq_ignore_ascii_case(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_in_fusion_order() {
        let obs = MultiSensorObservations::default()
            .with_magnetometer(MagneticHeadingObservation::new(10.0, 0.8))
            .with_star(StarObservationInput::new("vega", 60.0, 40.0, 0.9))
            .with_star(StarObservationInput::new("deneb", 50.0, 45.0, 0.7))
            .with_sun(CelestialObservation::new(180.0, 30.0));

        let kinds: Vec<_> = obs.channels().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![SensorKind::Sun, SensorKind::Star, SensorKind::Star, SensorKind::Magnetometer]
        );
    }

    #[test]
    fn weights_are_clamped() {
        let star = StarObservationInput::new("vega", 60.0, 40.0, 1.7);
        let heading = MagneticHeadingObservation { heading_deg: 0.0, confidence: f64::NAN };
        let sun = CelestialObservation::new(0.0, 0.0);

        assert_eq!(SensorChannel::Star(&star).weight(), 1.0);
        assert_eq!(SensorChannel::Magnetometer(&heading).weight(), 0.0);
        assert_eq!(SensorChannel::Sun(&sun).weight(), SUN_WEIGHT);
    }

    #[test]
    fn evidence_serializes_with_sensor_tag() {
        let evidence = SensorEvidence::Magnetometer {
            predicted: MagneticHeadingObservation::new(10.0, 1.0),
            observed: MagneticHeadingObservation::new(12.0, 0.9),
            delta: 2.0,
        };
        let json = serde_json::to_value(evidence).unwrap();
        assert_eq!(json["sensor"], "magnetometer");
        assert_eq!(json["delta"], 2.0);
        assert_eq!(evidence.delta_deg(), 2.0);
    }
}
