//! Ephemeris interface and reference data for CelestGuard
//!
//! The integrity engine never computes astronomy itself. It asks an
//! [`EphemerisProvider`] where a body *should* appear for a claimed observer
//! and instant, and compares that against what a sensor reports.
//!
//! This crate holds everything on the far side of that seam:
//! - The [`EphemerisProvider`] trait and its value types
//! - [`LowPrecisionEphemeris`], a reference provider good to a few hundredths
//!   of a degree for the sun and to J2000 catalog accuracy for stars
//! - Atmospheric [`Refraction`] models
//! - The bright-star [`StarCatalog`]
//!
//! ```rust
//! use celestguard_ephemeris::{Body, EphemerisProvider, LowPrecisionEphemeris, Observer, Refraction};
//! use chrono::{TimeZone, Utc};
//!
//! let paris = Observer::new(48.8566, 2.3522, 35.0);
//! let noon = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
//!
//! let sun = LowPrecisionEphemeris.horizontal(Body::Sun, &paris, noon, Refraction::Normal);
//! assert!(sun.elevation_deg > 60.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod astro;
pub mod catalog;
pub mod provider;
pub mod refraction;
pub mod solar;

pub use catalog::{CatalogError, CatalogStar, StarCatalog, BRIGHT_STARS, MAX_CATALOG_STARS};
pub use provider::LowPrecisionEphemeris;
pub use refraction::Refraction;

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geodetic position of an observer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observer {
    /// Latitude in degrees, north positive
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive
    pub longitude_deg: f64,
    /// Height above the reference ellipsoid in meters
    pub altitude_m: f64,
}

impl Observer {
    /// Create an observer at the given position
    pub const fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }
}

/// Apparent position of a body in the local horizontal frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Horizontal {
    /// Azimuth in degrees, clockwise from true north, in `[0, 360)`
    pub azimuth_deg: f64,
    /// Elevation above the horizon in degrees, in `[-90, 90]`
    pub elevation_deg: f64,
}

/// Body whose position is requested from a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body<'a> {
    /// The sun
    Sun,
    /// A catalog star
    Star(&'a CatalogStar),
}

/// Source of predicted body positions
///
/// Implementations must be pure: the same body, observer, instant and
/// refraction mode always yield the same position. The integrity engine
/// signs the returned values, so any nondeterminism shows up as spoofing.
pub trait EphemerisProvider: Send + Sync {
    /// Apparent azimuth/elevation of `body` seen from `observer` at `at`
    fn horizontal(
        &self,
        body: Body<'_>,
        observer: &Observer,
        at: DateTime<Utc>,
        refraction: Refraction,
    ) -> Horizontal;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn horizontal(
        &self,
        body: Body<'_>,
        observer: &Observer,
        at: DateTime<Utc>,
        refraction: Refraction,
    ) -> Horizontal {
        (**self).horizontal(body, observer, at, refraction)
    }
}
