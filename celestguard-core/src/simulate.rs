//! Synthetic sensor readings
//!
//! Builds plausible [`MultiSensorObservations`] from the validator's own
//! predictions plus uniform jitter, for demos and soak tests where no real
//! sensor is attached. Every jittered channel scores below 100% because
//! any nonzero perturbation changes the signature; zero jitter reproduces
//! the predictions exactly.

use rand::Rng;

use celestguard_ephemeris::EphemerisProvider;

use crate::{
    errors::GuardResult,
    geomagnetic::inject_noise,
    types::{CelestialObservation, MultiSensorObservations, NavigationState, StarObservationInput},
    validator::IntegrityValidator,
};

/// Noise and coverage for synthetic readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    /// Max solar jitter per axis, degrees
    pub sun_jitter_deg: f64,
    /// Max stellar jitter per axis, degrees
    pub star_jitter_deg: f64,
    /// Max compass jitter, degrees
    pub magnetometer_jitter_deg: f64,
    /// Stars to report, best first
    pub max_stars: usize,
    /// Report a compass heading
    pub magnetometer: bool,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            sun_jitter_deg: 0.05,
            star_jitter_deg: 0.01,
            magnetometer_jitter_deg: 1.0,
            max_stars: 5,
            magnetometer: true,
        }
    }
}

impl SimulationProfile {
    /// Noise-free readings
    pub fn exact() -> Self {
        Self {
            sun_jitter_deg: 0.0,
            star_jitter_deg: 0.0,
            magnetometer_jitter_deg: 0.0,
            ..Self::default()
        }
    }
}

/// Readings a healthy sensor suite would report at `state`
///
/// The sun is reported only outside the night gate. Stars come from the
/// visible list in confidence order, carrying their visibility confidence.
pub fn simulate_observations<E, R>(
    validator: &IntegrityValidator<E>,
    state: &NavigationState,
    profile: &SimulationProfile,
    rng: &mut R,
) -> GuardResult<MultiSensorObservations>
where
    E: EphemerisProvider,
    R: Rng + ?Sized,
{
    let mut observations = MultiSensorObservations::default();

    if !validator.is_night_time(state)? {
        let sun = validator.predict_sun(state)?;
        observations = observations.with_sun(jitter_bearing(&sun, profile.sun_jitter_deg, rng));
    }

    for star in validator.visible_stars(state)?.iter().take(profile.max_stars) {
        let bearing = jitter_bearing(&star.bearing(), profile.star_jitter_deg, rng);
        observations = observations.with_star(
            StarObservationInput::new(star.id, bearing.azimuth_deg, bearing.elevation_deg, star.confidence)
                .with_name(star.name),
        );
    }

    if profile.magnetometer {
        let heading = validator.predict_heading(state)?;
        observations = observations.with_magnetometer(inject_noise(&heading, profile.magnetometer_jitter_deg, rng));
    }

    Ok(observations)
}

fn jitter<R: Rng + ?Sized>(max_deg: f64, rng: &mut R) -> f64 {
    let span = max_deg.abs();
    if span > 0.0 && span.is_finite() {
        rng.gen_range(-span..=span)
    } else {
        0.0
    }
}

fn jitter_bearing<R: Rng + ?Sized>(bearing: &CelestialObservation, max_deg: f64, rng: &mut R) -> CelestialObservation {
    let azimuth = bearing.azimuth_deg + jitter(max_deg, rng);
    let elevation = (bearing.elevation_deg + jitter(max_deg, rng)).clamp(-90.0, 90.0);
    CelestialObservation::new(azimuth, elevation)
}
