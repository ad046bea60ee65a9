//! Apparent solar coordinates
//!
//! Implements the low-precision solar formulae of the Astronomical Almanac,
//! accurate to about 0.01° between 1950 and 2050.

use chrono::{DateTime, Utc};
use libm::{asin, atan2, cos, sin};

use crate::astro::{days_since_j2000, deg, normalize_degrees, rad};

/// Equatorial coordinates of the sun
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoordinates {
    /// Right ascension in degrees, `[0, 360)`
    pub right_ascension_deg: f64,
    /// Declination in degrees
    pub declination_deg: f64,
}

/// Sun's right ascension and declination at `at`
pub fn solar_coordinates(at: DateTime<Utc>) -> SolarCoordinates {
    let n = days_since_j2000(at);

    let mean_longitude = normalize_degrees(280.460 + 0.985_647_4 * n);
    let mean_anomaly = rad(normalize_degrees(357.528 + 0.985_600_3 * n));

    let ecliptic_longitude =
        rad(mean_longitude + 1.915 * sin(mean_anomaly) + 0.020 * sin(2.0 * mean_anomaly));
    let obliquity = rad(23.439 - 0.000_000_4 * n);

    let right_ascension = atan2(
        cos(obliquity) * sin(ecliptic_longitude),
        cos(ecliptic_longitude),
    );
    let declination = asin(sin(obliquity) * sin(ecliptic_longitude));

    SolarCoordinates {
        right_ascension_deg: normalize_degrees(deg(right_ascension)),
        declination_deg: deg(declination),
    }
}
