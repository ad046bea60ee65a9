//! Integrity verdicts
//!
//! Results are read-only evidence. Fields are private and exposed through
//! accessors; serialization uses camelCase names for downstream consumers.

use serde::Serialize;

use crate::{
    angles::{angular_separation, azimuth_delta},
    fusion::MultiSensorFusion,
    scorer::IntegrityStatus,
    timing::TimingsMs,
    types::CelestialObservation,
};

/// Angular disagreement between two bearings, observed minus predicted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BearingDelta {
    /// Azimuth difference, degrees, `(-180, 180]`
    pub azimuth_deg: f64,
    /// Elevation difference, degrees
    pub elevation_deg: f64,
    /// Great-circle separation, degrees, `[0, 180]`
    pub angle_deg: f64,
}

impl BearingDelta {
    /// Delta from `predicted` to `observed`
    pub fn between(predicted: &CelestialObservation, observed: &CelestialObservation) -> Self {
        Self {
            azimuth_deg: azimuth_delta(predicted.azimuth_deg, observed.azimuth_deg),
            elevation_deg: observed.elevation_deg - predicted.elevation_deg,
            angle_deg: angular_separation(
                predicted.azimuth_deg,
                predicted.elevation_deg,
                observed.azimuth_deg,
                observed.elevation_deg,
            ),
        }
    }
}

/// Solar channel evidence, present when a sun observation was supplied
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SolarEvidence {
    pub(crate) observed_sun: CelestialObservation,
    pub(crate) delta_az_deg: f64,
    pub(crate) delta_el_deg: f64,
    pub(crate) delta_angle_deg: f64,
    pub(crate) expected_signature_hex: String,
    pub(crate) observed_signature_hex: String,
    pub(crate) hamming_distance_bits: u32,
}

/// Top-level verdict for one validation call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityResult {
    pub(crate) predicted_sun: CelestialObservation,
    #[serde(flatten)]
    pub(crate) solar: Option<SolarEvidence>,
    pub(crate) integrity_score_pct: f64,
    pub(crate) status: IntegrityStatus,
    pub(crate) timings_ms: TimingsMs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) multi_sensor: Option<MultiSensorFusion>,
}

impl IntegrityResult {
    /// Sun bearing predicted for the claimed state
    pub fn predicted_sun(&self) -> &CelestialObservation {
        &self.predicted_sun
    }

    /// Sun bearing reported by the sensor
    pub fn observed_sun(&self) -> Option<&CelestialObservation> {
        self.solar.as_ref().map(|s| &s.observed_sun)
    }

    /// Solar azimuth delta, observed minus predicted, `(-180, 180]`
    pub fn delta_az_deg(&self) -> Option<f64> {
        self.solar.as_ref().map(|s| s.delta_az_deg)
    }

    /// Solar elevation delta, observed minus predicted
    pub fn delta_el_deg(&self) -> Option<f64> {
        self.solar.as_ref().map(|s| s.delta_el_deg)
    }

    /// Great-circle separation of predicted and observed sun
    pub fn delta_angle_deg(&self) -> Option<f64> {
        self.solar.as_ref().map(|s| s.delta_angle_deg)
    }

    /// Signature over the predicted solar observation, lowercase hex
    pub fn expected_signature_hex(&self) -> Option<&str> {
        self.solar.as_ref().map(|s| s.expected_signature_hex.as_str())
    }

    /// Signature over the observed solar observation, lowercase hex
    pub fn observed_signature_hex(&self) -> Option<&str> {
        self.solar.as_ref().map(|s| s.observed_signature_hex.as_str())
    }

    /// Differing bits between the solar signatures
    pub fn hamming_distance_bits(&self) -> Option<u32> {
        self.solar.as_ref().map(|s| s.hamming_distance_bits)
    }

    /// Solar score for single-sensor calls, consensus for multi-sensor calls
    pub fn integrity_score_pct(&self) -> f64 {
        self.integrity_score_pct
    }

    /// Classified verdict
    pub fn status(&self) -> IntegrityStatus {
        self.status
    }

    /// Phase timings
    pub fn timings_ms(&self) -> &TimingsMs {
        &self.timings_ms
    }

    /// Fusion evidence, multi-sensor calls only
    pub fn multi_sensor(&self) -> Option<&MultiSensorFusion> {
        self.multi_sensor.as_ref()
    }

    /// Serialize as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
