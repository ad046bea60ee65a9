//! Validator Configuration
//!
//! Knobs that change how predictions are made or judged. All of them have
//! sensible defaults; a JSON document may override any subset:
//!
//! ```json
//! {
//!   "refraction": "jplhor",
//!   "thresholds": { "nominalScorePct": 97.0, "degradedScorePct": 85.0 },
//!   "starMinElevationDeg": 15.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use celestguard_ephemeris::Refraction;

use crate::{
    constants::astronomy::DEFAULT_STAR_MIN_ELEVATION_DEG,
    errors::{GuardResult, IntegrityError},
    scorer::Thresholds,
    traits::Validatable,
};

/// Settings for an [`IntegrityValidator`](crate::IntegrityValidator)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Refraction model for predicted elevations
    pub refraction: Refraction,
    /// Status thresholds
    pub thresholds: Thresholds,
    /// Minimum elevation (°) for a star to count as visible
    pub star_min_elevation_deg: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            refraction: Refraction::Normal,
            thresholds: Thresholds::default(),
            star_min_elevation_deg: DEFAULT_STAR_MIN_ELEVATION_DEG,
        }
    }
}

impl ValidatorConfig {
    /// Tighter thresholds and higher stars, for fixed installations
    pub fn strict() -> Self {
        Self {
            thresholds: Thresholds {
                nominal_score_pct: 98.0,
                degraded_score_pct: 90.0,
            },
            star_min_elevation_deg: 20.0,
            ..Self::default()
        }
    }

    /// Looser thresholds and lower stars, for moving platforms
    pub fn lenient() -> Self {
        Self {
            thresholds: Thresholds {
                nominal_score_pct: 90.0,
                degraded_score_pct: 70.0,
            },
            star_min_elevation_deg: 5.0,
            ..Self::default()
        }
    }

    /// Replace the refraction model
    pub fn with_refraction(mut self, refraction: Refraction) -> Self {
        self.refraction = refraction;
        self
    }

    /// Replace the status thresholds
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the star elevation cutoff
    pub fn with_star_min_elevation(mut self, degrees: f64) -> Self {
        self.star_min_elevation_deg = degrees;
        self
    }

    /// Check every field
    pub fn validate(&self) -> GuardResult<()> {
        self.thresholds.validate()?;

        if !self.star_min_elevation_deg.is_valid()
            || !(-90.0..=90.0).contains(&self.star_min_elevation_deg)
        {
            return Err(IntegrityError::config(
                "starMinElevationDeg must lie within [-90, 90]",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> GuardResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| IntegrityError::config(format!("unreadable config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.refraction, Refraction::Normal);
        assert_eq!(config.thresholds.nominal_score_pct, 95.0);
        assert_eq!(config.thresholds.degraded_score_pct, 80.0);
        assert_eq!(config.star_min_elevation_deg, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets_are_valid() {
        assert!(ValidatorConfig::strict().validate().is_ok());
        assert!(ValidatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ValidatorConfig::from_json(r#"{ "refraction": "jplhor" }"#).unwrap();
        assert_eq!(config.refraction, Refraction::JplHor);
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.star_min_elevation_deg, DEFAULT_STAR_MIN_ELEVATION_DEG);
    }

    #[test]
    fn full_json() {
        let config = ValidatorConfig::from_json(
            r#"{
                "refraction": "off",
                "thresholds": { "nominalScorePct": 97.0, "degradedScorePct": 85.0 },
                "starMinElevationDeg": 15.0
            }"#,
        )
        .unwrap();
        assert_eq!(config.refraction, Refraction::Off);
        assert_eq!(config.thresholds.nominal_score_pct, 97.0);
        assert_eq!(config.star_min_elevation_deg, 15.0);
    }

    #[test]
    fn bad_json_is_config_error() {
        assert!(matches!(
            ValidatorConfig::from_json("{ not json"),
            Err(IntegrityError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ValidatorConfig::from_json(r#"{ "refraction": "foggy" }"#),
            Err(IntegrityError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let json = r#"{ "thresholds": { "nominalScorePct": 80.0, "degradedScorePct": 95.0 } }"#;
        assert!(matches!(
            ValidatorConfig::from_json(json),
            Err(IntegrityError::InvalidConfig { .. })
        ));
        assert!(ValidatorConfig::default()
            .with_star_min_elevation(120.0)
            .validate()
            .is_err());
    }
}
