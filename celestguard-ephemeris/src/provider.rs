//! Reference ephemeris provider

use chrono::{DateTime, Utc};

use crate::{
    astro::equatorial_to_horizontal, solar::solar_coordinates, Body, EphemerisProvider,
    Horizontal, Observer, Refraction,
};

/// Low-precision analytic ephemeris
///
/// Sun from the Astronomical Almanac formulae, stars straight from their
/// catalog coordinates, both rotated into the local horizon with mean
/// sidereal time and then refracted. Stateless and allocation free.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPrecisionEphemeris;

impl EphemerisProvider for LowPrecisionEphemeris {
    fn horizontal(
        &self,
        body: Body<'_>,
        observer: &Observer,
        at: DateTime<Utc>,
        refraction: Refraction,
    ) -> Horizontal {
        let (right_ascension_deg, declination_deg) = match body {
            Body::Sun => {
                let sun = solar_coordinates(at);
                (sun.right_ascension_deg, sun.declination_deg)
            }
            Body::Star(star) => (star.right_ascension_deg, star.declination_deg),
        };

        let geometric = equatorial_to_horizontal(right_ascension_deg, declination_deg, observer, at);

        Horizontal {
            azimuth_deg: geometric.azimuth_deg,
            elevation_deg: refraction.apply(geometric.elevation_deg),
        }
    }
}
