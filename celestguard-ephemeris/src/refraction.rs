//! Atmospheric refraction
//!
//! Saemundsson's formula for standard pressure and temperature:
//!
//! ```text
//! R(arcmin) = 1.02 / tan(h + 10.3 / (h + 5.11))
//! ```
//!
//! The formula diverges below the horizon, so `h` is floored at -1°.
//! [`Refraction::Normal`] then tapers the correction linearly to zero at the
//! nadir; [`Refraction::JplHor`] keeps the -1° value all the way down, which
//! matches what JPL Horizons reports for bodies below the horizon.

use libm::tan;

use crate::astro::rad;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Refraction correction applied to predicted elevations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Refraction {
    /// Standard refraction, tapered below -1°
    #[default]
    Normal,
    /// JPL Horizons compatible refraction
    JplHor,
    /// Geometric positions, no correction
    Off,
}

impl Refraction {
    /// Name used in configuration files
    pub const fn name(&self) -> &'static str {
        match self {
            Refraction::Normal => "normal",
            Refraction::JplHor => "jplhor",
            Refraction::Off => "off",
        }
    }

    /// Refraction angle in degrees to add to a geometric elevation
    pub fn angle(&self, elevation_deg: f64) -> f64 {
        if !(-90.0..=90.0).contains(&elevation_deg) {
            return 0.0;
        }

        match self {
            Refraction::Off => 0.0,
            Refraction::Normal | Refraction::JplHor => {
                let h = elevation_deg.max(-1.0);
                let mut refraction = (1.02 / tan(rad(h + 10.3 / (h + 5.11)))) / 60.0;

                if *self == Refraction::Normal && elevation_deg < -1.0 {
                    refraction *= (elevation_deg + 90.0) / 89.0;
                }

                refraction
            }
        }
    }

    /// Apparent elevation for a geometric elevation, capped at the zenith
    pub fn apply(&self, elevation_deg: f64) -> f64 {
        (elevation_deg + self.angle(elevation_deg)).min(90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_refraction_about_half_degree() {
        let r = Refraction::Normal.angle(0.0);
        assert!(r > 0.45 && r < 0.5, "got {}", r);
    }

    #[test]
    fn off_is_geometric() {
        assert_eq!(Refraction::Off.apply(12.5), 12.5);
    }

    #[test]
    fn normal_tapers_below_horizon() {
        let normal = Refraction::Normal.angle(-45.0);
        let jplhor = Refraction::JplHor.angle(-45.0);
        assert!(normal < jplhor);
        assert!(Refraction::Normal.angle(-90.0).abs() < 1e-12);
    }

    #[test]
    fn high_elevations_barely_refracted() {
        assert!(Refraction::Normal.angle(85.0).abs() < 0.01);
        assert!(Refraction::Normal.apply(90.0) <= 90.0);
    }
}
