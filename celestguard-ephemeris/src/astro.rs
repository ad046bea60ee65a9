//! Time scales and coordinate transforms
//!
//! Low-precision formulae only: UT1 is taken as UTC, precession and nutation
//! are ignored, and the observer's height does not enter the transform.

use chrono::{DateTime, Utc};
use libm::{asin, atan2, cos, fmod, sin};

use crate::{Horizontal, Observer};

/// Julian date of the Unix epoch
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of J2000.0
pub const J2000_JD: f64 = 2_451_545.0;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Degrees to radians
#[inline]
pub fn rad(deg: f64) -> f64 {
    deg * core::f64::consts::PI / 180.0
}

/// Radians to degrees
#[inline]
pub fn deg(rad: f64) -> f64 {
    rad * 180.0 / core::f64::consts::PI
}

/// Wrap an angle into `[0, 360)`
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = fmod(angle, 360.0);
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // fmod(-1e-17, 360) + 360 rounds to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        // fmod keeps the sign of zero; -0.0 + 0.0 is +0.0
        wrapped + 0.0
    }
}

/// Julian date for a UTC instant (millisecond resolution)
pub fn julian_day(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

/// Days elapsed since J2000.0
pub fn days_since_j2000(at: DateTime<Utc>) -> f64 {
    julian_day(at) - J2000_JD
}

/// Greenwich mean sidereal time in degrees, `[0, 360)`
pub fn gmst_degrees(at: DateTime<Utc>) -> f64 {
    let d = days_since_j2000(at);
    let t = d / 36_525.0;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Convert equatorial coordinates to geometric horizontal coordinates
///
/// Azimuth is measured clockwise from true north.
pub fn equatorial_to_horizontal(
    right_ascension_deg: f64,
    declination_deg: f64,
    observer: &Observer,
    at: DateTime<Utc>,
) -> Horizontal {
    let local_sidereal = gmst_degrees(at) + observer.longitude_deg;
    let hour_angle = rad(normalize_degrees(local_sidereal - right_ascension_deg));

    let lat = rad(observer.latitude_deg);
    let dec = rad(declination_deg);

    let sin_el = sin(lat) * sin(dec) + cos(lat) * cos(dec) * cos(hour_angle);
    let elevation = asin(sin_el.clamp(-1.0, 1.0));

    let azimuth = atan2(
        -cos(dec) * sin(hour_angle),
        sin(dec) * cos(lat) - cos(dec) * sin(lat) * cos(hour_angle),
    );

    Horizontal {
        azimuth_deg: normalize_degrees(deg(azimuth)),
        elevation_deg: deg(elevation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn julian_day_of_j2000() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(j2000) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn gmst_at_j2000() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((gmst_degrees(j2000) - 280.460_618_37).abs() < 1e-6);
    }

    #[test]
    fn normalize_wraps_negative_and_large() {
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(359.5), 359.5);
    }

    #[test]
    fn normalize_drops_negative_zero() {
        assert!(normalize_degrees(-0.0).is_sign_positive());
        assert!(normalize_degrees(-720.0).is_sign_positive());
    }

    #[test]
    fn pole_star_elevation_tracks_latitude() {
        // A body at the celestial pole sits at the observer's latitude
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let observer = Observer::new(45.0, 10.0, 0.0);
        let pos = equatorial_to_horizontal(0.0, 90.0, &observer, at);
        assert!((pos.elevation_deg - 45.0).abs() < 1e-9);
    }

    proptest::proptest! {
        #[test]
        fn horizontal_coordinates_stay_in_range(
            ra in 0.0f64..360.0,
            dec in -90.0f64..=90.0,
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            secs in 946_684_800i64..4_102_444_800,
        ) {
            let at = Utc.timestamp_opt(secs, 0).unwrap();
            let pos = equatorial_to_horizontal(ra, dec, &Observer::new(lat, lon, 0.0), at);
            proptest::prop_assert!((0.0..360.0).contains(&pos.azimuth_deg));
            proptest::prop_assert!(pos.elevation_deg.abs() <= 90.0 + 1e-9);
        }
    }
}
