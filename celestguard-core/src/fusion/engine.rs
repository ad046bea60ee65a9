//! Fusion entry points on the validator

use celestguard_ephemeris::EphemerisProvider;

use super::{
    MultiSensorFusion, MultiSensorSignatureDetail, SensorChannel, SensorEvidence, WeightedConsensus,
};
use crate::{
    angles::azimuth_delta,
    errors::GuardResult,
    result::{BearingDelta, IntegrityResult, SolarEvidence},
    stars::is_night_elevation,
    timing::{Phase, PhaseTimer},
    traits::Sanitize,
    types::{CelestialObservation, MultiSensorObservations, NavigationState},
    validator::{solar_evidence, Comparison, IntegrityValidator},
};

/// Everything one fusion run produces
struct FusionRun {
    predicted_sun: CelestialObservation,
    solar: Option<SolarEvidence>,
    fusion: MultiSensorFusion,
}

impl<E: EphemerisProvider> IntegrityValidator<E> {
    /// Validate every supplied channel and combine them
    ///
    /// Fails with `NoContributingSensor` when no channel carries positive
    /// weight, and with `UnknownStar` when a sighting names a star missing
    /// from the catalog.
    pub fn fuse(&self, state: &NavigationState, observations: &MultiSensorObservations) -> GuardResult<MultiSensorFusion> {
        let mut timer = PhaseTimer::start();
        Ok(self.run_fusion(state, observations, &mut timer)?.fusion)
    }

    /// Fused validation
    ///
    /// The top-level score and status are the consensus. Solar fields are
    /// filled when a sun observation was supplied.
    pub fn validate_multi_sensor(
        &self,
        state: &NavigationState,
        observations: &MultiSensorObservations,
    ) -> GuardResult<IntegrityResult> {
        let mut timer = PhaseTimer::start();
        let run = self.run_fusion(state, observations, &mut timer)?;

        let score = run.fusion.consensus_score_pct;
        let status = self.config().thresholds.classify(score);

        log_debug!(
            "Multi-sensor validation: {} of {} channels contributed, consensus {:.2}% ({})",
            run.fusion.sensor_count,
            run.fusion.signatures.len(),
            score,
            status
        );

        Ok(IntegrityResult {
            predicted_sun: run.predicted_sun,
            solar: run.solar,
            integrity_score_pct: score,
            status,
            timings_ms: timer.finish(),
            multi_sensor: Some(run.fusion),
        })
    }

    fn run_fusion(
        &self,
        state: &NavigationState,
        observations: &MultiSensorObservations,
        timer: &mut PhaseTimer,
    ) -> GuardResult<FusionRun> {
        let state = state.sanitize()?;
        let observer = state.observer();
        let sky = self.sky();

        let predicted_sun = timer.measure(Phase::Prediction, || sky.sun(&observer, state.timestamp));
        let night = is_night_elevation(predicted_sun.elevation_deg);

        if night && observations.sun.is_none() {
            log_debug!("Sun at {:.2}° is below nautical twilight, solar channel skipped", predicted_sun.elevation_deg);
        }

        let mut consensus = WeightedConsensus::new();
        let mut signatures = Vec::with_capacity(observations.stars.len() + 2);
        let mut solar = None;

        for channel in observations.channels() {
            let weight = channel.weight();

            let (id, name, confidence, evidence, comparison) = match channel {
                SensorChannel::Sun(observed) => {
                    let observed = observed.sanitize()?;
                    let comparison = self.compare(&state, &predicted_sun, &observed, timer)?;
                    solar = Some(solar_evidence(&predicted_sun, &observed, &comparison));

                    let evidence = SensorEvidence::Sun {
                        predicted: predicted_sun,
                        observed,
                        delta: BearingDelta::between(&predicted_sun, &observed),
                    };
                    ("sun".to_string(), None, weight, evidence, comparison)
                }
                SensorChannel::Star(sighting) => {
                    let sighting = sighting.sanitize()?;
                    let (star, predicted) = timer.measure(Phase::Prediction, || {
                        sky.predict(&sighting.id, &observer, state.timestamp)
                    })?;
                    let observed = sighting.bearing();
                    let comparison = self.compare(&state, &predicted, &observed, timer)?;

                    let evidence = SensorEvidence::Star {
                        predicted,
                        observed,
                        delta: BearingDelta::between(&predicted, &observed),
                    };
                    let name = sighting.name.clone().or_else(|| Some(star.name.to_string()));
                    (star.id.to_string(), name, sighting.confidence, evidence, comparison)
                }
                SensorChannel::Magnetometer(observed) => {
                    let observed = observed.sanitize()?;
                    let predicted = timer.measure(Phase::Prediction, || self.heading_at(&state));
                    let comparison = self.compare(&state, &predicted, &observed, timer)?;

                    let evidence = SensorEvidence::Magnetometer {
                        predicted,
                        observed,
                        delta: azimuth_delta(predicted.heading_deg, observed.heading_deg),
                    };
                    ("magnetometer".to_string(), None, observed.confidence, evidence, comparison)
                }
            };

            let applied = consensus.add(comparison.score.integrity_score_pct, weight);
            signatures.push(detail(id, name, confidence, applied, evidence, &comparison, self));
        }

        let result = consensus.finish()?;

        Ok(FusionRun {
            predicted_sun,
            solar,
            fusion: MultiSensorFusion {
                consensus_score_pct: result.score_pct,
                sensor_count: result.sensor_count,
                signatures,
                night,
            },
        })
    }
}

fn detail<E: EphemerisProvider>(
    id: String,
    name: Option<String>,
    confidence: f64,
    weight: f64,
    evidence: SensorEvidence,
    comparison: &Comparison,
    validator: &IntegrityValidator<E>,
) -> MultiSensorSignatureDetail {
    let score = comparison.score.integrity_score_pct;
    let status = validator.config().thresholds.classify(score);

    log_trace!(
        "{} channel {}: {} bits, {:.2}% ({}), weight {:.2}",
        evidence.kind().name(),
        id,
        comparison.score.hamming_distance_bits,
        score,
        status,
        weight
    );

    MultiSensorSignatureDetail {
        delta_deg: evidence.delta_deg(),
        id,
        name,
        evidence,
        confidence: confidence.clamp(0.0, 1.0),
        weight,
        expected_signature_hex: comparison.expected.to_hex(),
        observed_signature_hex: comparison.observed.to_hex(),
        hamming_distance_bits: comparison.score.hamming_distance_bits,
        integrity_score_pct: score,
        status,
    }
}
