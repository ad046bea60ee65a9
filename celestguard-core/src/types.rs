//! Navigation and observation values
//!
//! Everything here is a short-lived immutable value: built by the caller,
//! sanitized once at the engine boundary, discarded with the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use celestguard_ephemeris::{Horizontal, Observer};

use crate::{
    angles::{check_finite, check_range, normalize_degrees},
    errors::{GuardResult, IntegrityError},
    traits::{AngularFields, Sanitize},
};

const NANOS_PER_MS: u32 = 1_000_000;

/// Claimed position and time under test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Claimed UTC instant
    pub timestamp: DateTime<Utc>,
    /// Claimed latitude, degrees north
    pub latitude_deg: f64,
    /// Claimed longitude, degrees east
    pub longitude_deg: f64,
    /// Claimed altitude, meters
    pub altitude_m: f64,
}

impl NavigationState {
    /// Create a navigation state
    pub fn new(timestamp: DateTime<Utc>, latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            timestamp,
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Milliseconds since the Unix epoch, rounded to nearest
    pub fn timestamp_ms(&self) -> GuardResult<u64> {
        let millis = self.timestamp.timestamp_millis();
        // Leap-second instants report >= 1e9 subsecond nanos
        let remainder = self.timestamp.timestamp_subsec_nanos() % NANOS_PER_MS;
        let rounded = if remainder >= NANOS_PER_MS / 2 {
            millis.saturating_add(1)
        } else {
            millis
        };

        u64::try_from(rounded).map_err(|_| IntegrityError::invalid("timestamp", "before the Unix epoch"))
    }

    /// Observer position for ephemeris queries
    pub fn observer(&self) -> Observer {
        Observer::new(self.latitude_deg, self.longitude_deg, self.altitude_m)
    }
}

impl Sanitize for NavigationState {
    fn sanitize(&self) -> GuardResult<Self> {
        self.timestamp_ms()?;
        Ok(Self {
            timestamp: self.timestamp,
            latitude_deg: check_range(self.latitude_deg, -90.0, 90.0, "latitude_deg")?,
            longitude_deg: check_range(self.longitude_deg, -180.0, 180.0, "longitude_deg")?,
            altitude_m: check_finite(self.altitude_m, "altitude_m")?,
        })
    }
}

/// Horizontal-coordinate bearing of the sun or a star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialObservation {
    /// Azimuth, degrees clockwise from true north, `[0, 360)`
    pub azimuth_deg: f64,
    /// Elevation above the horizon, degrees, `[-90, 90]`
    pub elevation_deg: f64,
}

impl CelestialObservation {
    /// Create a bearing, wrapping the azimuth into `[0, 360)`
    pub fn new(azimuth_deg: f64, elevation_deg: f64) -> Self {
        Self {
            azimuth_deg: normalize_degrees(azimuth_deg),
            elevation_deg,
        }
    }

    /// Same bearing rotated by `delta_deg` in azimuth
    pub fn offset_azimuth(&self, delta_deg: f64) -> Self {
        Self::new(self.azimuth_deg + delta_deg, self.elevation_deg)
    }
}

impl From<Horizontal> for CelestialObservation {
    fn from(h: Horizontal) -> Self {
        Self::new(h.azimuth_deg, h.elevation_deg)
    }
}

impl AngularFields for CelestialObservation {
    fn angular_fields(&self) -> [f64; 2] {
        [self.azimuth_deg, self.elevation_deg]
    }
}

impl Sanitize for CelestialObservation {
    fn sanitize(&self) -> GuardResult<Self> {
        let azimuth = check_finite(self.azimuth_deg, "azimuth_deg")?;
        let elevation = check_range(self.elevation_deg, -90.0, 90.0, "elevation_deg")?;
        Ok(Self::new(azimuth, elevation))
    }
}

/// Compass heading with the sensor's self-reported confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagneticHeadingObservation {
    /// True heading, degrees, `[0, 360)`
    pub heading_deg: f64,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl MagneticHeadingObservation {
    /// Create a heading, wrapping into `[0, 360)` and clamping confidence
    pub fn new(heading_deg: f64, confidence: f64) -> Self {
        Self {
            heading_deg: normalize_degrees(heading_deg),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

impl AngularFields for MagneticHeadingObservation {
    fn angular_fields(&self) -> [f64; 2] {
        [self.heading_deg, 0.0]
    }
}

impl Sanitize for MagneticHeadingObservation {
    fn sanitize(&self) -> GuardResult<Self> {
        let heading = check_finite(self.heading_deg, "heading_deg")?;
        let confidence = check_range(self.confidence, 0.0, 1.0, "confidence")?;
        Ok(Self::new(heading, confidence))
    }
}

/// One claimed stellar sighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarObservationInput {
    /// Catalog identifier
    pub id: String,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Observed azimuth, degrees
    pub azimuth_deg: f64,
    /// Observed elevation, degrees
    pub elevation_deg: f64,
    /// Sighting confidence in `[0, 1]`
    pub confidence: f64,
}

impl StarObservationInput {
    /// Create a sighting
    pub fn new(id: impl Into<String>, azimuth_deg: f64, elevation_deg: f64, confidence: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            azimuth_deg,
            elevation_deg,
            confidence,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The sighting as a bearing
    pub fn bearing(&self) -> CelestialObservation {
        CelestialObservation::new(self.azimuth_deg, self.elevation_deg)
    }
}

impl Sanitize for StarObservationInput {
    fn sanitize(&self) -> GuardResult<Self> {
        if self.id.trim().is_empty() {
            return Err(IntegrityError::invalid("id", "empty star id"));
        }
        let bearing = CelestialObservation::new(self.azimuth_deg, self.elevation_deg).sanitize()?;
        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            azimuth_deg: bearing.azimuth_deg,
            elevation_deg: bearing.elevation_deg,
            confidence: check_range(self.confidence, 0.0, 1.0, "confidence")?,
        })
    }
}

/// Whatever subset of sensors reported for one validation
///
/// No sun observation is the normal state at night.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiSensorObservations {
    /// Observed solar bearing
    pub sun: Option<CelestialObservation>,
    /// Observed stars, fused in this order
    pub stars: Vec<StarObservationInput>,
    /// Observed compass heading
    pub magnetometer: Option<MagneticHeadingObservation>,
}

impl MultiSensorObservations {
    /// Set the solar bearing
    pub fn with_sun(mut self, sun: CelestialObservation) -> Self {
        self.sun = Some(sun);
        self
    }

    /// Append a star sighting
    pub fn with_star(mut self, star: StarObservationInput) -> Self {
        self.stars.push(star);
        self
    }

    /// Set the compass heading
    pub fn with_magnetometer(mut self, heading: MagneticHeadingObservation) -> Self {
        self.magnetometer = Some(heading);
        self
    }

    /// True when no sensor reported anything
    pub fn is_empty(&self) -> bool {
        self.sun.is_none() && self.stars.is_empty() && self.magnetometer.is_none()
    }
}
