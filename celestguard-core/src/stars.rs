//! Star Visibility Engine
//!
//! Which catalog stars a sensor could plausibly be looking at, and how much
//! each one should be trusted:
//!
//! ```text
//! elevation_term = clamp((el - min_el) / 60, 0, 1)
//! magnitude_term = clamp(1 - mag / 2, 0.3, 1)
//! confidence     = elevation_term × magnitude_term
//! ```
//!
//! Stars at or below the minimum elevation are dropped; the rest come back
//! brightest-and-highest first.

use chrono::{DateTime, Utc};
use heapless::Vec;
use serde::Serialize;

use celestguard_ephemeris::{
    Body, CatalogStar, EphemerisProvider, Observer, Refraction, StarCatalog, MAX_CATALOG_STARS,
};

use crate::{
    constants::astronomy::{
        NAUTICAL_TWILIGHT_SUN_ELEVATION_DEG, STAR_ELEVATION_RAMP_DEG, STAR_MAGNITUDE_SCALE,
        STAR_MIN_MAGNITUDE_CONFIDENCE,
    },
    errors::{GuardResult, IntegrityError},
    types::CelestialObservation,
};

/// Visible stars, bounded by catalog capacity
pub type VisibleStars = Vec<StarObservation, MAX_CATALOG_STARS>;

/// A catalog star's predicted position and trust
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarObservation {
    /// Catalog identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Predicted azimuth, degrees
    pub azimuth_deg: f64,
    /// Predicted elevation, degrees
    pub elevation_deg: f64,
    /// Visual magnitude
    pub magnitude: f64,
    /// Combined elevation and brightness confidence, `[0, 1]`
    pub confidence: f64,
}

impl StarObservation {
    /// The prediction as a bearing
    pub fn bearing(&self) -> CelestialObservation {
        CelestialObservation::new(self.azimuth_deg, self.elevation_deg)
    }
}

/// Confidence for a star at `elevation_deg` with the given magnitude
pub fn star_confidence(elevation_deg: f64, magnitude: f64, min_elevation_deg: f64) -> f64 {
    if elevation_deg <= min_elevation_deg {
        return 0.0;
    }
    let elevation_term = ((elevation_deg - min_elevation_deg) / STAR_ELEVATION_RAMP_DEG).clamp(0.0, 1.0);
    let magnitude_term =
        (1.0 - magnitude / STAR_MAGNITUDE_SCALE).clamp(STAR_MIN_MAGNITUDE_CONFIDENCE, 1.0);
    elevation_term * magnitude_term
}

/// True when a solar elevation lies past nautical twilight
pub fn is_night_elevation(sun_elevation_deg: f64) -> bool {
    sun_elevation_deg < NAUTICAL_TWILIGHT_SUN_ELEVATION_DEG
}

/// Star queries against one provider and catalog
pub struct StarVisibility<'a, E: EphemerisProvider + ?Sized> {
    provider: &'a E,
    catalog: &'a StarCatalog,
    refraction: Refraction,
}

impl<'a, E: EphemerisProvider + ?Sized> StarVisibility<'a, E> {
    /// Bind a provider and catalog
    pub fn new(provider: &'a E, catalog: &'a StarCatalog, refraction: Refraction) -> Self {
        Self {
            provider,
            catalog,
            refraction,
        }
    }

    /// Stars above `min_elevation_deg`, highest confidence first
    ///
    /// Ties keep catalog order.
    pub fn visible_stars(&self, observer: &Observer, at: DateTime<Utc>, min_elevation_deg: f64) -> VisibleStars {
        let mut visible = VisibleStars::new();

        for star in self.catalog.iter() {
            let position = self.provider.horizontal(Body::Star(star), observer, at, self.refraction);
            if position.elevation_deg <= min_elevation_deg {
                continue;
            }

            let observation = StarObservation {
                id: star.id,
                name: star.name,
                azimuth_deg: position.azimuth_deg,
                elevation_deg: position.elevation_deg,
                magnitude: star.magnitude,
                confidence: star_confidence(position.elevation_deg, star.magnitude, min_elevation_deg),
            };

            // Capacity equals the catalog's
            if visible.push(observation).is_err() {
                break;
            }
        }

        visible.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        visible
    }

    /// Sun past nautical twilight for this observer
    pub fn is_night_time(&self, observer: &Observer, at: DateTime<Utc>) -> bool {
        is_night_elevation(self.sun(observer, at).elevation_deg)
    }

    /// Predicted solar bearing
    pub fn sun(&self, observer: &Observer, at: DateTime<Utc>) -> CelestialObservation {
        self.provider
            .horizontal(Body::Sun, observer, at, self.refraction)
            .into()
    }

    /// Predicted bearing of a catalog star by id
    pub fn predict(&self, id: &str, observer: &Observer, at: DateTime<Utc>) -> GuardResult<(&'a CatalogStar, CelestialObservation)> {
        let star = self
            .catalog
            .get(id)
            .ok_or_else(|| IntegrityError::UnknownStar { id: id.to_string() })?;

        let position = self.provider.horizontal(Body::Star(star), observer, at, self.refraction);
        Ok((star, position.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestguard_ephemeris::{Horizontal, LowPrecisionEphemeris};
    use chrono::TimeZone;

    /// Puts every body at a fixed elevation, azimuth by catalog RA
    struct FixedSky {
        sun_elevation_deg: f64,
        star_elevation_deg: f64,
    }

    impl EphemerisProvider for FixedSky {
        fn horizontal(&self, body: Body<'_>, _: &Observer, _: DateTime<Utc>, _: Refraction) -> Horizontal {
            match body {
                Body::Sun => Horizontal {
                    azimuth_deg: 180.0,
                    elevation_deg: self.sun_elevation_deg,
                },
                Body::Star(star) => Horizontal {
                    azimuth_deg: star.right_ascension_deg,
                    elevation_deg: self.star_elevation_deg,
                },
            }
        }
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 23, 0, 0).unwrap()
    }

    #[test]
    fn confidence_terms() {
        // At the threshold: nothing
        assert_eq!(star_confidence(10.0, 0.0, 10.0), 0.0);
        // Halfway up the ramp, magnitude 0
        assert!((star_confidence(40.0, 0.0, 10.0) - 0.5).abs() < 1e-12);
        // Bright star fully up
        assert!((star_confidence(80.0, -1.46, 10.0) - 1.0).abs() < 1e-12);
        // Faint star floored at 0.3
        assert!((star_confidence(80.0, 3.0, 10.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn night_boundary() {
        assert!(is_night_elevation(-15.0));
        assert!(!is_night_elevation(5.0));
        assert!(!is_night_elevation(-12.0));
    }

    #[test]
    fn night_time_from_provider() {
        let catalog = StarCatalog::bright_stars();
        let night = FixedSky { sun_elevation_deg: -15.0, star_elevation_deg: 45.0 };
        let day = FixedSky { sun_elevation_deg: 5.0, star_elevation_deg: 45.0 };
        let observer = Observer::new(0.0, 0.0, 0.0);

        assert!(StarVisibility::new(&night, &catalog, Refraction::Off).is_night_time(&observer, midnight()));
        assert!(!StarVisibility::new(&day, &catalog, Refraction::Off).is_night_time(&observer, midnight()));
    }

    #[test]
    fn stars_below_threshold_dropped() {
        let catalog = StarCatalog::bright_stars();
        let sky = FixedSky { sun_elevation_deg: -30.0, star_elevation_deg: 10.0 };
        let engine = StarVisibility::new(&sky, &catalog, Refraction::Off);
        assert!(engine.visible_stars(&Observer::new(0.0, 0.0, 0.0), midnight(), 10.0).is_empty());
    }

    #[test]
    fn sorted_by_descending_confidence_ties_in_catalog_order() {
        let catalog = StarCatalog::bright_stars();
        let sky = FixedSky { sun_elevation_deg: -30.0, star_elevation_deg: 70.0 };
        let engine = StarVisibility::new(&sky, &catalog, Refraction::Off);
        let stars = engine.visible_stars(&Observer::new(0.0, 0.0, 0.0), midnight(), 10.0);

        assert_eq!(stars.len(), catalog.len());
        for pair in stars.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        // Magnitude <= 0 stars all score 1.0; Sirius leads the catalog
        assert_eq!(stars[0].id, "sirius");
        assert_eq!(stars.last().map(|s| s.id), Some("polaris"));
    }

    #[test]
    fn full_catalog_keeps_every_star() {
        let entries: [CatalogStar; MAX_CATALOG_STARS] = core::array::from_fn(|i| CatalogStar {
            id: Box::leak(format!("star-{i}").into_boxed_str()),
            name: "synthetic",
            right_ascension_deg: i as f64 * 5.0,
            declination_deg: 0.0,
            magnitude: 1.0,
        });
        let catalog = StarCatalog::new(&entries).unwrap();
        let sky = FixedSky { sun_elevation_deg: -30.0, star_elevation_deg: 45.0 };
        let engine = StarVisibility::new(&sky, &catalog, Refraction::Off);

        let stars = engine.visible_stars(&Observer::new(0.0, 0.0, 0.0), midnight(), 10.0);
        assert_eq!(stars.len(), MAX_CATALOG_STARS);
        assert_eq!(stars[0].id, "star-0");
    }

    #[test]
    fn real_sky_over_paris() {
        let catalog = StarCatalog::bright_stars();
        let engine = StarVisibility::new(&LowPrecisionEphemeris, &catalog, Refraction::Normal);
        let paris = Observer::new(48.8566, 2.3522, 35.0);

        assert!(engine.is_night_time(&paris, midnight()));
        let stars = engine.visible_stars(&paris, midnight(), 10.0);
        assert!(!stars.is_empty());
        assert!(stars.iter().all(|s| s.elevation_deg > 10.0));
        // Circumpolar from Paris
        assert!(stars.iter().any(|s| s.id == "polaris"));
        // Never rises at 49°N
        assert!(stars.iter().all(|s| s.id != "acrux"));
    }

    #[test]
    fn unknown_star_rejected() {
        let catalog = StarCatalog::bright_stars();
        let engine = StarVisibility::new(&LowPrecisionEphemeris, &catalog, Refraction::Normal);
        let result = engine.predict("tatooine", &Observer::new(0.0, 0.0, 0.0), midnight());
        assert_eq!(
            result.map(|(s, _)| s.id),
            Err(IntegrityError::UnknownStar { id: "tatooine".into() })
        );
    }
}
