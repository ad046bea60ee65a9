//! Angle utilities
//!
//! Conventions used everywhere in the engine:
//! - Azimuths and headings live in `[0, 360)`, clockwise from true north
//! - Differences are `observed - predicted`, wrapped into `(-180, 180]`
//! - Elevations are not wrapped

use libm::{acos, cos, sin};

use celestguard_ephemeris::astro::{deg, rad};

use crate::{
    errors::{GuardResult, IntegrityError},
    traits::Validatable,
};

pub use celestguard_ephemeris::astro::normalize_degrees;

/// Wrap an angular difference into `(-180, 180]`
pub fn wrap_delta_degrees(delta: f64) -> f64 {
    let wrapped = normalize_degrees(delta);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed difference `observed - predicted` on the circle
pub fn azimuth_delta(predicted_deg: f64, observed_deg: f64) -> f64 {
    wrap_delta_degrees(observed_deg - predicted_deg)
}

/// Great-circle separation between two horizontal bearings, degrees
///
/// Both bearings become unit vectors `(cosEl·sinAz, cosEl·cosAz, sinEl)`;
/// the dot product is clamped before `acos` so rounding never yields NaN.
pub fn angular_separation(
    azimuth_a_deg: f64,
    elevation_a_deg: f64,
    azimuth_b_deg: f64,
    elevation_b_deg: f64,
) -> f64 {
    let a = unit_vector(azimuth_a_deg, elevation_a_deg);
    let b = unit_vector(azimuth_b_deg, elevation_b_deg);
    let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    deg(acos(dot.clamp(-1.0, 1.0)))
}

fn unit_vector(azimuth_deg: f64, elevation_deg: f64) -> [f64; 3] {
    let az = rad(azimuth_deg);
    let el = rad(elevation_deg);
    [cos(el) * sin(az), cos(el) * cos(az), sin(el)]
}

/// Reject NaN and infinities
pub fn check_finite(value: f64, field: &'static str) -> GuardResult<f64> {
    if value.is_valid() {
        Ok(value)
    } else {
        Err(IntegrityError::invalid(field, "not a finite number"))
    }
}

/// Check a finite value lies in `[min, max]`
pub fn check_range(value: f64, min: f64, max: f64, field: &'static str) -> GuardResult<f64> {
    let value = check_finite(value, field)?;
    if value < min || value > max {
        Err(IntegrityError::invalid(field, "outside allowed range"))
    } else {
        Ok(value)
    }
}
