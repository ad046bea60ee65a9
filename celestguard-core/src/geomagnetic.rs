//! Geomagnetic Model
//!
//! A deliberately low-fidelity stand-in for IGRF/WMM. It is an axial dipole
//! with a longitude-dependent wobble on the east component:
//!
//! ```text
//! B0 = B_eq × (R / (R + h))³ × (1 + sv × years_since_epoch)
//! x  = B0 × cos(lat)                     north
//! y  = B0 × k × sin(lon) × cos(lat)      east
//! z  = 2 × B0 × sin(lat)                 down
//! ```
//!
//! The numbers will not match a real field table. What matters is that the
//! model is deterministic and position dependent, so a spoofed position
//! predicts a different heading than the true one.
//!
//! ## Heading Convention
//!
//! `heading` reports the bearing of the tilt-compensated horizontal field
//! vector in the sensor frame, corrected to true north by adding declination.
//! Predicted and observed headings go through the same convention, so only
//! consistency matters for integrity scoring.

use chrono::{DateTime, Utc};
use libm::{atan2, cos, sin, sqrt};
use rand::Rng;
use serde::Serialize;

use celestguard_ephemeris::astro::{deg, rad};

use crate::{
    angles::normalize_degrees,
    constants::geomagnetic::{
        EARTH_REFERENCE_RADIUS_M, EAST_PERTURBATION_RATIO, EQUATORIAL_FIELD_NT,
        MODEL_EPOCH_UNIX_MS, MS_PER_JULIAN_YEAR, NOISE_CONFIDENCE_FACTOR,
        NOMINAL_FIELD_INTENSITY_NT, SECULAR_VARIATION_PER_YEAR,
    },
    types::MagneticHeadingObservation,
};

/// Field vector in the local north-east-down frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagneticField {
    /// North component, nT
    pub x: f64,
    /// East component, nT
    pub y: f64,
    /// Down component, nT
    pub z: f64,
    /// Angle of the horizontal component east of true north, degrees
    pub declination_deg: f64,
    /// Dip below the horizontal, degrees
    pub inclination_deg: f64,
    /// Field magnitude, nT
    pub total_intensity_nt: f64,
}

/// Simplified dipole field model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeomagneticModel {
    equatorial_field_nt: f64,
    east_perturbation_ratio: f64,
    secular_variation_per_year: f64,
}

impl Default for GeomagneticModel {
    fn default() -> Self {
        Self {
            equatorial_field_nt: EQUATORIAL_FIELD_NT,
            east_perturbation_ratio: EAST_PERTURBATION_RATIO,
            secular_variation_per_year: SECULAR_VARIATION_PER_YEAR,
        }
    }
}

impl GeomagneticModel {
    /// Model with custom coefficients
    pub fn new(equatorial_field_nt: f64, east_perturbation_ratio: f64, secular_variation_per_year: f64) -> Self {
        Self {
            equatorial_field_nt: equatorial_field_nt.abs(),
            east_perturbation_ratio,
            secular_variation_per_year,
        }
    }

    /// Field at a position and time
    pub fn field(&self, latitude_deg: f64, longitude_deg: f64, altitude_m: f64, at: DateTime<Utc>) -> MagneticField {
        let lat = rad(latitude_deg);
        let lon = rad(longitude_deg);

        // Floor keeps the fall-off finite for nonsense depths
        let radius = (EARTH_REFERENCE_RADIUS_M + altitude_m).max(EARTH_REFERENCE_RADIUS_M * 0.5);
        let ratio = EARTH_REFERENCE_RADIUS_M / radius;

        let years = (at.timestamp_millis() - MODEL_EPOCH_UNIX_MS) as f64 / MS_PER_JULIAN_YEAR;
        let secular = (1.0 + self.secular_variation_per_year * years).max(0.0);

        let b0 = self.equatorial_field_nt * ratio * ratio * ratio * secular;

        let x = b0 * cos(lat);
        let y = b0 * self.east_perturbation_ratio * sin(lon) * cos(lat);
        let z = 2.0 * b0 * sin(lat);

        let horizontal = sqrt(x * x + y * y);

        MagneticField {
            x,
            y,
            z,
            declination_deg: deg(atan2(y, x)),
            inclination_deg: deg(atan2(z, horizontal)),
            total_intensity_nt: sqrt(x * x + y * y + z * z),
        }
    }

    /// Tilt-compensated true heading and confidence for a field reading
    pub fn heading(&self, field: &MagneticField, roll_deg: f64, pitch_deg: f64) -> MagneticHeadingObservation {
        let roll = rad(roll_deg);
        let pitch = rad(pitch_deg);

        let xh = field.x * cos(pitch) + field.y * sin(roll) * sin(pitch) + field.z * cos(roll) * sin(pitch);
        let yh = field.y * cos(roll) - field.z * sin(roll);

        let magnetic_heading = deg(atan2(yh, xh));
        let true_heading = normalize_degrees(magnetic_heading + field.declination_deg);

        let confidence = (field.total_intensity_nt / NOMINAL_FIELD_INTENSITY_NT).clamp(0.0, 1.0);

        MagneticHeadingObservation::new(true_heading, confidence)
    }
}

/// Perturb a heading with uniform jitter of up to `±max_jitter_deg`
///
/// Synthesizes an imperfect sensor for demonstrations. Confidence drops
/// slightly to mark the reading as simulated.
pub fn inject_noise<R: Rng + ?Sized>(
    reading: &MagneticHeadingObservation,
    max_jitter_deg: f64,
    rng: &mut R,
) -> MagneticHeadingObservation {
    let span = max_jitter_deg.abs();
    let jitter = if span > 0.0 && span.is_finite() {
        rng.gen_range(-span..=span)
    } else {
        0.0
    };

    MagneticHeadingObservation::new(
        reading.heading_deg + jitter,
        reading.confidence * NOISE_CONFIDENCE_FACTOR,
    )
}
