//! Integration tests for multi-sensor fusion
//!
//! Tests consensus behaviour across channels:
//! - Weighted averaging of per-channel scores
//! - Night gating of the solar channel
//! - Evidence trail ordering and zero-weight auditing
//! - Partial spoofing of one modality

#[macro_use]
mod common;

use celestguard_core::{
    fusion::WeightedConsensus, simulate_observations, CelestialObservation, IntegrityError,
    IntegrityStatus, IntegrityValidator, MagneticHeadingObservation, MultiSensorObservations,
    SensorEvidence, SensorKind, SimulationProfile, StarCatalog, StarObservationInput, ValidatorConfig,
};
use rand::{rngs::StdRng, SeedableRng};

use common::{honest_night_sky, paris_night, paris_noon, validator, ScriptedSky, TEST_KEY};

#[test]
fn test_consensus_weighting() {
    let equal: WeightedConsensus = [(100.0, 1.0), (0.0, 1.0)].into_iter().collect();
    assert_within_tolerance!(equal.finish().unwrap().score_pct, 50.0, 1e-12);

    let skewed: WeightedConsensus = [(100.0, 0.9), (0.0, 0.1)].into_iter().collect();
    assert_within_tolerance!(skewed.finish().unwrap().score_pct, 90.0, 1e-9);
}

#[test]
fn test_night_gate_from_sun_elevation() {
    let night = IntegrityValidator::with_provider(
        TEST_KEY,
        ValidatorConfig::default(),
        ScriptedSky::with_sun_elevation(-15.0),
        StarCatalog::bright_stars(),
    )
    .unwrap();
    let day = IntegrityValidator::with_provider(
        TEST_KEY,
        ValidatorConfig::default(),
        ScriptedSky::with_sun_elevation(5.0),
        StarCatalog::bright_stars(),
    )
    .unwrap();

    assert!(night.is_night_time(&paris_noon()).unwrap());
    assert!(!day.is_night_time(&paris_noon()).unwrap());
}

#[test]
fn test_empty_night_has_no_consensus() {
    let validator = validator();
    let state = paris_night();
    assert!(validator.is_night_time(&state).unwrap());

    assert_eq!(
        validator.validate_multi_sensor(&state, &MultiSensorObservations::default()),
        Err(IntegrityError::NoContributingSensor)
    );
}

#[test]
fn test_only_zero_confidence_channels_fail() {
    let validator = validator();
    let state = paris_night();
    let observations = MultiSensorObservations::default()
        .with_star(StarObservationInput::new("sirius", 150.0, 20.0, 0.0))
        .with_magnetometer(MagneticHeadingObservation::new(0.0, 0.0));

    assert_eq!(
        validator.fuse(&state, &observations),
        Err(IntegrityError::NoContributingSensor)
    );
}

#[test]
fn test_honest_night_sky_nominal() {
    let validator = validator();
    let state = paris_night();
    let observations = honest_night_sky(&validator, &state, 5);

    let result = validator.validate_multi_sensor(&state, &observations).unwrap();
    let fusion = result.multi_sensor().unwrap();

    assert_eq!(result.status(), IntegrityStatus::Nominal);
    assert_eq!(result.integrity_score_pct(), fusion.consensus_score_pct());
    assert_eq!(fusion.sensor_count(), observations.stars.len() + 1);
    assert!(fusion.night());
    assert!(result.observed_sun().is_none());
    assert!(result.hamming_distance_bits().is_none());
}

#[test]
fn test_daytime_with_sun_reports_solar_fields() {
    let validator = validator();
    let state = paris_noon();
    let sun = validator.predict_sun(&state).unwrap();
    let observations = MultiSensorObservations::default()
        .with_sun(sun)
        .with_magnetometer(validator.predict_heading(&state).unwrap());

    let result = validator.validate_multi_sensor(&state, &observations).unwrap();
    let fusion = result.multi_sensor().unwrap();

    assert!(!fusion.night());
    assert_eq!(result.observed_sun(), Some(&sun));
    assert_eq!(result.hamming_distance_bits(), Some(0));
    assert_eq!(fusion.signatures()[0].kind(), SensorKind::Sun);
    assert_eq!(fusion.signatures()[0].weight(), 1.0);
}

#[test]
fn test_daytime_without_sun_skips_solar_channel() {
    let validator = validator();
    let state = paris_noon();
    let observations =
        MultiSensorObservations::default().with_magnetometer(validator.predict_heading(&state).unwrap());

    let result = validator.validate_multi_sensor(&state, &observations).unwrap();
    let fusion = result.multi_sensor().unwrap();

    assert_eq!(fusion.signatures().len(), 1);
    assert_eq!(fusion.signatures()[0].kind(), SensorKind::Magnetometer);
    assert!(result.observed_sun().is_none());
}

#[test]
fn test_trusted_honest_star_outweighs_untrusted_spoof() {
    let validator = validator();
    let state = paris_night();
    let visible = validator.visible_stars(&state).unwrap();
    let (first, second) = (&visible[0], &visible[1]);

    let honest = first.bearing();
    let spoofed = second.bearing().offset_azimuth(15.0);
    let observations = MultiSensorObservations::default()
        .with_star(StarObservationInput::new(first.id, honest.azimuth_deg, honest.elevation_deg, 0.9))
        .with_star(StarObservationInput::new(second.id, spoofed.azimuth_deg, spoofed.elevation_deg, 0.1));

    let fusion = validator.fuse(&state, &observations).unwrap();
    let spoof_score = fusion.signatures()[1].integrity_score_pct();

    assert_eq!(fusion.signatures()[0].integrity_score_pct(), 100.0);
    assert!(spoof_score < 100.0);
    assert_within_tolerance!(fusion.consensus_score_pct(), 90.0 + 0.1 * spoof_score, 1e-9);
}

#[test]
fn test_evidence_trail_is_ordered_and_complete() {
    let validator = validator();
    let state = paris_night();
    let mut observations = honest_night_sky(&validator, &state, 3);
    observations.stars.push(StarObservationInput::new("polaris", 0.5, 49.0, 0.0).with_name("North Star"));
    let observations = observations.with_sun(CelestialObservation::new(0.0, -30.0));

    let fusion = validator.fuse(&state, &observations).unwrap();
    let signatures = fusion.signatures();

    assert_eq!(signatures.len(), 1 + 4 + 1);
    assert_eq!(signatures[0].id(), "sun");
    assert_eq!(signatures[4].id(), "polaris");
    assert_eq!(signatures[4].name(), Some("North Star"));
    assert!(!signatures[4].contributed());
    assert_eq!(signatures[5].id(), "magnetometer");

    // Sun (weight 1), three stars, compass; polaris audited only
    assert_eq!(fusion.sensor_count(), 5);

    for detail in signatures {
        assert_eq!(detail.expected_signature_hex().len(), 128);
        assert!(detail.confidence() >= 0.0 && detail.confidence() <= 1.0);
        match detail.evidence() {
            SensorEvidence::Sun { delta, .. } | SensorEvidence::Star { delta, .. } => {
                assert!(delta.azimuth_deg > -180.0 && delta.azimuth_deg <= 180.0);
                assert_eq!(detail.delta_deg(), delta.angle_deg);
            }
            SensorEvidence::Magnetometer { delta, .. } => assert_eq!(detail.delta_deg(), *delta),
        }
    }
}

#[test]
fn test_spoofed_position_fails_every_channel() {
    let validator = validator();
    let truth = paris_night();
    let observations = honest_night_sky(&validator, &truth, 4);

    // Same sensors, claimed position 5° further south and east
    let mut claimed = truth;
    claimed.latitude_deg -= 5.0;
    claimed.longitude_deg += 5.0;

    let result = validator.validate_multi_sensor(&claimed, &observations).unwrap();
    let fusion = result.multi_sensor().unwrap();

    assert_eq!(result.status(), IntegrityStatus::Anomalous);
    assert!(fusion.signatures().iter().all(|d| d.hamming_distance_bits() > 0));
}

#[test]
fn test_simulated_noise_degrades_consensus() {
    let validator = validator();
    let state = paris_night();
    let mut rng = StdRng::seed_from_u64(2025);

    let exact = simulate_observations(&validator, &state, &SimulationProfile::exact(), &mut rng).unwrap();
    let noisy = simulate_observations(&validator, &state, &SimulationProfile::default(), &mut rng).unwrap();

    let exact = validator.validate_multi_sensor(&state, &exact).unwrap();
    let noisy = validator.validate_multi_sensor(&state, &noisy).unwrap();

    assert_eq!(exact.integrity_score_pct(), 100.0);
    assert!(noisy.integrity_score_pct() < exact.integrity_score_pct());
}

#[test]
fn test_multi_sensor_result_serializes() {
    let validator = validator();
    let state = paris_night();
    let observations = honest_night_sky(&validator, &state, 2);
    let result = validator.validate_multi_sensor(&state, &observations).unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    let multi = &json["multiSensor"];

    assert_eq!(multi["sensorCount"], 3);
    assert_eq!(multi["night"], true);
    assert_eq!(multi["signatures"][0]["sensor"], "star");
    assert!(multi["signatures"][0]["predicted"]["azimuthDeg"].is_number());
    assert_eq!(multi["signatures"][2]["sensor"], "magnetometer");
    assert!(json.get("observedSun").is_none());
}
