//! Common fixtures for integration tests
//!
//! - Reference navigation states (Paris at solstice noon and winter night)
//! - Validators with fixed test keys
//! - A scripted ephemeris provider for gating tests
//! - Tolerance assertions

#![allow(dead_code)]

use celestguard_core::{
    IntegrityValidator, MultiSensorObservations, NavigationState, StarObservationInput,
    ValidatorConfig,
};
use celestguard_ephemeris::{Body, EphemerisProvider, Horizontal, Observer, Refraction};
use chrono::{DateTime, TimeZone, Utc};

pub const TEST_KEY: &str = "integration-test-key";

pub const PARIS_LAT: f64 = 48.8566;
pub const PARIS_LON: f64 = 2.3522;
pub const PARIS_ALT: f64 = 35.0;

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// 2025-06-21T12:00:00Z over Paris
pub fn paris_noon() -> NavigationState {
    NavigationState::new(at(2025, 6, 21, 12, 0, 0), PARIS_LAT, PARIS_LON, PARIS_ALT)
}

/// 2025-01-15T23:00:00Z over Paris, well past twilight
pub fn paris_night() -> NavigationState {
    NavigationState::new(at(2025, 1, 15, 23, 0, 0), PARIS_LAT, PARIS_LON, PARIS_ALT)
}

pub fn validator() -> IntegrityValidator {
    IntegrityValidator::new(TEST_KEY, ValidatorConfig::default()).unwrap()
}

/// Stars and compass exactly as predicted
pub fn honest_night_sky(validator: &IntegrityValidator, state: &NavigationState, stars: usize) -> MultiSensorObservations {
    let mut observations = MultiSensorObservations::default();
    for star in validator.visible_stars(state).unwrap().iter().take(stars) {
        let bearing = star.bearing();
        observations = observations.with_star(StarObservationInput::new(
            star.id,
            bearing.azimuth_deg,
            bearing.elevation_deg,
            star.confidence,
        ));
    }
    observations.with_magnetometer(validator.predict_heading(state).unwrap())
}

/// Provider returning fixed elevations regardless of time and place
pub struct ScriptedSky {
    pub sun: Horizontal,
    pub star_elevation_deg: f64,
}

impl ScriptedSky {
    pub fn with_sun_elevation(elevation_deg: f64) -> Self {
        Self {
            sun: Horizontal {
                azimuth_deg: 180.0,
                elevation_deg,
            },
            star_elevation_deg: 45.0,
        }
    }
}

impl EphemerisProvider for ScriptedSky {
    fn horizontal(&self, body: Body<'_>, _: &Observer, _: DateTime<Utc>, _: Refraction) -> Horizontal {
        match body {
            Body::Sun => self.sun,
            Body::Star(star) => Horizontal {
                azimuth_deg: star.right_ascension_deg,
                elevation_deg: self.star_elevation_deg,
            },
        }
    }
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}
