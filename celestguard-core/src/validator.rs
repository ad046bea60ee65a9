//! Single-Sensor Validator
//!
//! ## Pipeline
//!
//! ```text
//! state, observed
//!     │ sanitize
//!     ▼
//! predict ───────────────── (prediction timer)
//!     │
//!     ▼
//! pack + sign predicted ─┐
//! pack + sign observed ──┴─ (crypto timer)
//!     │
//!     ▼
//! Hamming score → status, angular deltas
//! ```
//!
//! The validator is immutable after construction. It holds the keyed
//! authenticator, the configuration, an ephemeris provider and the star
//! catalog, and it can be shared across threads behind an `Arc`.

use celestguard_ephemeris::{EphemerisProvider, LowPrecisionEphemeris, StarCatalog};

use crate::{
    auth::{Authenticator, Signature, SigningKey},
    codec::pack,
    config::ValidatorConfig,
    errors::GuardResult,
    geomagnetic::GeomagneticModel,
    result::{BearingDelta, IntegrityResult, SolarEvidence},
    scorer::{self, SignatureScore},
    stars::{StarVisibility, VisibleStars},
    timing::{Phase, PhaseTimer},
    traits::{AngularFields, Sanitize},
    types::{CelestialObservation, MagneticHeadingObservation, NavigationState},
};

/// Signatures and score for one predicted/observed pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Comparison {
    pub(crate) expected: Signature,
    pub(crate) observed: Signature,
    pub(crate) score: SignatureScore,
}

/// Integrity engine bound to one key and configuration
pub struct IntegrityValidator<E: EphemerisProvider = LowPrecisionEphemeris> {
    authenticator: Authenticator,
    config: ValidatorConfig,
    provider: E,
    catalog: StarCatalog,
    geomagnetic: GeomagneticModel,
}

impl IntegrityValidator {
    /// Validator with the built-in ephemeris and bright-star catalog
    pub fn new(key: impl Into<SigningKey>, config: ValidatorConfig) -> GuardResult<Self> {
        Self::with_provider(key, config, LowPrecisionEphemeris, StarCatalog::bright_stars())
    }
}

impl<E: EphemerisProvider> IntegrityValidator<E> {
    /// Validator with a caller-supplied ephemeris provider and catalog
    pub fn with_provider(
        key: impl Into<SigningKey>,
        config: ValidatorConfig,
        provider: E,
        catalog: StarCatalog,
    ) -> GuardResult<Self> {
        config.validate()?;
        let authenticator = Authenticator::new(key)?;

        log_debug!(
            "Integrity validator ready: refraction={}, nominal>={}%, degraded>={}%, {} catalog stars",
            config.refraction.name(),
            config.thresholds.nominal_score_pct,
            config.thresholds.degraded_score_pct,
            catalog.len()
        );

        Ok(Self {
            authenticator,
            config,
            provider,
            catalog,
            geomagnetic: GeomagneticModel::default(),
        })
    }

    /// Replace the geomagnetic model
    pub fn with_geomagnetic_model(mut self, model: GeomagneticModel) -> Self {
        self.geomagnetic = model;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Star catalog used for predictions
    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    pub(crate) fn sky(&self) -> StarVisibility<'_, E> {
        StarVisibility::new(&self.provider, &self.catalog, self.config.refraction)
    }

    /// Field model used for heading predictions
    pub fn geomagnetic(&self) -> &GeomagneticModel {
        &self.geomagnetic
    }

    /// Sun bearing predicted for a claimed state
    pub fn predict_sun(&self, state: &NavigationState) -> GuardResult<CelestialObservation> {
        let state = state.sanitize()?;
        Ok(self.sky().sun(&state.observer(), state.timestamp))
    }

    /// Bearing of a catalog star predicted for a claimed state
    pub fn predict_star(&self, state: &NavigationState, id: &str) -> GuardResult<CelestialObservation> {
        let state = state.sanitize()?;
        let (_, bearing) = self.sky().predict(id, &state.observer(), state.timestamp)?;
        Ok(bearing)
    }

    /// Compass heading predicted for a claimed state, level sensor
    pub fn predict_heading(&self, state: &NavigationState) -> GuardResult<MagneticHeadingObservation> {
        let state = state.sanitize()?;
        Ok(self.heading_at(&state))
    }

    pub(crate) fn heading_at(&self, state: &NavigationState) -> MagneticHeadingObservation {
        let field = self.geomagnetic.field(
            state.latitude_deg,
            state.longitude_deg,
            state.altitude_m,
            state.timestamp,
        );
        self.geomagnetic.heading(&field, 0.0, 0.0)
    }

    /// Catalog stars above the configured minimum elevation
    pub fn visible_stars(&self, state: &NavigationState) -> GuardResult<VisibleStars> {
        let state = state.sanitize()?;
        Ok(self
            .sky()
            .visible_stars(&state.observer(), state.timestamp, self.config.star_min_elevation_deg))
    }

    /// Sun below nautical twilight at the claimed state
    pub fn is_night_time(&self, state: &NavigationState) -> GuardResult<bool> {
        let state = state.sanitize()?;
        Ok(self.sky().is_night_time(&state.observer(), state.timestamp))
    }

    /// Validate a claimed state against one observed sun bearing
    pub fn validate(&self, state: &NavigationState, observed_sun: &CelestialObservation) -> GuardResult<IntegrityResult> {
        let mut timer = PhaseTimer::start();

        let state = state.sanitize()?;
        let observed_sun = observed_sun.sanitize()?;

        let predicted_sun = timer.measure(Phase::Prediction, || {
            self.sky().sun(&state.observer(), state.timestamp)
        });

        let comparison = self.compare(&state, &predicted_sun, &observed_sun, &mut timer)?;
        let status = self.config.thresholds.classify(comparison.score.integrity_score_pct);

        log_debug!(
            "Solar validation: {} bits differ, score {:.2}% ({})",
            comparison.score.hamming_distance_bits,
            comparison.score.integrity_score_pct,
            status
        );

        Ok(IntegrityResult {
            predicted_sun,
            solar: Some(solar_evidence(&predicted_sun, &observed_sun, &comparison)),
            integrity_score_pct: comparison.score.integrity_score_pct,
            status,
            timings_ms: timer.finish(),
            multi_sensor: None,
        })
    }

    /// Sign both sides of a pair and score them
    pub(crate) fn compare<O: AngularFields>(
        &self,
        state: &NavigationState,
        predicted: &O,
        observed: &O,
        timer: &mut PhaseTimer,
    ) -> GuardResult<Comparison> {
        let (expected, observed) = timer.measure(Phase::Crypto, || -> GuardResult<_> {
            let expected = self.authenticator.sign(&pack(state, predicted)?);
            let observed = self.authenticator.sign(&pack(state, observed)?);
            Ok((expected, observed))
        })?;

        let score = scorer::score(expected.as_ref(), observed.as_ref())?;

        log_trace!("Signatures {} vs {}", expected.to_hex(), observed.to_hex());

        Ok(Comparison {
            expected,
            observed,
            score,
        })
    }
}

pub(crate) fn solar_evidence(
    predicted: &CelestialObservation,
    observed: &CelestialObservation,
    comparison: &Comparison,
) -> SolarEvidence {
    let delta = BearingDelta::between(predicted, observed);
    SolarEvidence {
        observed_sun: *observed,
        delta_az_deg: delta.azimuth_deg,
        delta_el_deg: delta.elevation_deg,
        delta_angle_deg: delta.angle_deg,
        expected_signature_hex: comparison.expected.to_hex(),
        observed_signature_hex: comparison.observed.to_hex(),
        hamming_distance_bits: comparison.score.hamming_distance_bits,
    }
}

impl<E: EphemerisProvider> core::fmt::Debug for IntegrityValidator<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntegrityValidator")
            .field("authenticator", &self.authenticator)
            .field("config", &self.config)
            .field("catalog_stars", &self.catalog.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::IntegrityError, scorer::IntegrityStatus};
    use chrono::{TimeZone, Utc};

    fn paris_noon() -> NavigationState {
        NavigationState::new(
            Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap(),
            48.8566,
            2.3522,
            35.0,
        )
    }

    fn validator() -> IntegrityValidator {
        IntegrityValidator::new("unit-test-key", ValidatorConfig::default()).unwrap()
    }

    #[test]
    fn self_agreement_is_nominal() {
        let validator = validator();
        let state = paris_noon();
        let predicted = validator.predict_sun(&state).unwrap();

        let result = validator.validate(&state, &predicted).unwrap();
        assert_eq!(result.hamming_distance_bits(), Some(0));
        assert_eq!(result.integrity_score_pct(), 100.0);
        assert_eq!(result.status(), IntegrityStatus::Nominal);
        assert_eq!(result.expected_signature_hex(), result.observed_signature_hex());
        assert!(result.multi_sensor().is_none());
    }

    #[test]
    fn shifted_sun_is_not_nominal() {
        let validator = validator();
        let state = paris_noon();
        let observed = validator.predict_sun(&state).unwrap().offset_azimuth(100.0);

        let result = validator.validate(&state, &observed).unwrap();
        assert!(result.hamming_distance_bits().unwrap() > 0);
        assert_ne!(result.status(), IntegrityStatus::Nominal);
        assert!((result.delta_az_deg().unwrap() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn different_keys_same_verdict() {
        let state = paris_noon();
        let a = IntegrityValidator::new("alpha", ValidatorConfig::default()).unwrap();
        let b = IntegrityValidator::new(b"bravo".to_vec(), ValidatorConfig::default()).unwrap();
        let observed = a.predict_sun(&state).unwrap();

        let ra = a.validate(&state, &observed).unwrap();
        let rb = b.validate(&state, &observed).unwrap();
        assert_eq!(ra.status(), rb.status());
        assert_ne!(ra.expected_signature_hex(), rb.expected_signature_hex());
    }

    #[test]
    fn bad_inputs_rejected_before_signing() {
        let validator = validator();
        let mut state = paris_noon();
        state.latitude_deg = f64::NAN;
        assert!(matches!(
            validator.validate(&state, &CelestialObservation::new(0.0, 0.0)),
            Err(IntegrityError::InvalidInput { field: "latitude_deg", .. })
        ));

        let observed = CelestialObservation { azimuth_deg: f64::INFINITY, elevation_deg: 10.0 };
        assert!(validator.validate(&paris_noon(), &observed).is_err());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ValidatorConfig::default().with_thresholds(crate::scorer::Thresholds {
            nominal_score_pct: 50.0,
            degraded_score_pct: 60.0,
        });
        assert!(matches!(
            IntegrityValidator::new("k", config),
            Err(IntegrityError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn heading_prediction_is_deterministic() {
        let validator = validator();
        let a = validator.predict_heading(&paris_noon()).unwrap();
        let b = validator.predict_heading(&paris_noon()).unwrap();
        assert_eq!(a, b);
        assert!(a.heading_deg >= 0.0 && a.heading_deg < 360.0);
    }

    #[test]
    fn star_prediction_needs_known_id() {
        let validator = validator();
        assert!(validator.predict_star(&paris_noon(), "Vega").is_ok());
        assert!(matches!(
            validator.predict_star(&paris_noon(), "nope"),
            Err(IntegrityError::UnknownStar { .. })
        ));
    }
}
