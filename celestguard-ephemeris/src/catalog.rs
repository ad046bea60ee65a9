//! Bright-star catalog
//!
//! Reference data only. Positions are J2000.0 (ICRS) right ascension and
//! declination in degrees, magnitudes are visual (V). Proper motion and
//! precession are not applied; over a few decades that costs a fraction of a
//! degree, which is well inside what the integrity engine cares about because
//! predictions and observations are signed with the same catalog.
//!
//! The catalog has a fixed capacity so visibility queries can return a
//! stack-allocated list.

use heapless::Vec;
use thiserror_no_std::Error;

/// Maximum number of stars a catalog can hold
pub const MAX_CATALOG_STARS: usize = 64;

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogStar {
    /// Stable lowercase identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Right ascension, degrees
    pub right_ascension_deg: f64,
    /// Declination, degrees
    pub declination_deg: f64,
    /// Apparent visual magnitude, lower is brighter
    pub magnitude: f64,
}

impl CatalogStar {
    const fn new(
        id: &'static str,
        name: &'static str,
        right_ascension_deg: f64,
        declination_deg: f64,
        magnitude: f64,
    ) -> Self {
        Self {
            id,
            name,
            right_ascension_deg,
            declination_deg,
            magnitude,
        }
    }
}

/// The brightest navigational stars
pub const BRIGHT_STARS: &[CatalogStar] = &[
    CatalogStar::new("sirius", "Sirius", 101.287, -16.716, -1.46),
    CatalogStar::new("canopus", "Canopus", 95.988, -52.696, -0.74),
    CatalogStar::new("rigil_kentaurus", "Rigil Kentaurus", 219.902, -60.834, -0.27),
    CatalogStar::new("arcturus", "Arcturus", 213.915, 19.182, -0.05),
    CatalogStar::new("vega", "Vega", 279.234, 38.784, 0.03),
    CatalogStar::new("capella", "Capella", 79.172, 45.998, 0.08),
    CatalogStar::new("rigel", "Rigel", 78.634, -8.202, 0.13),
    CatalogStar::new("procyon", "Procyon", 114.825, 5.225, 0.34),
    CatalogStar::new("achernar", "Achernar", 24.429, -57.237, 0.46),
    CatalogStar::new("betelgeuse", "Betelgeuse", 88.793, 7.407, 0.50),
    CatalogStar::new("hadar", "Hadar", 210.956, -60.373, 0.61),
    CatalogStar::new("altair", "Altair", 297.696, 8.868, 0.77),
    CatalogStar::new("acrux", "Acrux", 186.650, -63.099, 0.76),
    CatalogStar::new("aldebaran", "Aldebaran", 68.980, 16.509, 0.86),
    CatalogStar::new("antares", "Antares", 247.352, -26.432, 0.96),
    CatalogStar::new("spica", "Spica", 201.298, -11.161, 0.97),
    CatalogStar::new("pollux", "Pollux", 116.329, 28.026, 1.14),
    CatalogStar::new("fomalhaut", "Fomalhaut", 344.413, -29.622, 1.16),
    CatalogStar::new("deneb", "Deneb", 310.358, 45.280, 1.25),
    CatalogStar::new("regulus", "Regulus", 152.093, 11.967, 1.35),
    CatalogStar::new("polaris", "Polaris", 37.955, 89.264, 1.98),
];

const _: () = assert!(BRIGHT_STARS.len() <= MAX_CATALOG_STARS);

/// Catalog construction errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CatalogError {
    /// More entries than [`MAX_CATALOG_STARS`]
    #[error("Catalog holds at most {capacity} stars, got {requested}")]
    CapacityExceeded {
        /// Catalog capacity
        capacity: usize,
        /// Number of entries supplied
        requested: usize,
    },

    /// Two entries share an identifier
    #[error("Duplicate star id: {id}")]
    DuplicateId {
        /// The repeated identifier
        id: &'static str,
    },
}

/// Fixed-capacity star catalog
#[derive(Debug, Clone)]
pub struct StarCatalog {
    stars: Vec<CatalogStar, MAX_CATALOG_STARS>,
}

impl Default for StarCatalog {
    fn default() -> Self {
        Self::bright_stars()
    }
}

impl StarCatalog {
    /// Build a catalog from custom entries
    pub fn new(entries: &[CatalogStar]) -> Result<Self, CatalogError> {
        if entries.len() > MAX_CATALOG_STARS {
            return Err(CatalogError::CapacityExceeded {
                capacity: MAX_CATALOG_STARS,
                requested: entries.len(),
            });
        }

        let mut stars = Vec::new();
        for entry in entries {
            if stars
                .iter()
                .any(|s: &CatalogStar| s.id.eq_ignore_ascii_case(entry.id))
            {
                return Err(CatalogError::DuplicateId { id: entry.id });
            }
            stars.push(*entry).map_err(|_| CatalogError::CapacityExceeded {
                capacity: MAX_CATALOG_STARS,
                requested: entries.len(),
            })?;
        }

        Ok(Self { stars })
    }

    /// The built-in [`BRIGHT_STARS`] table
    pub fn bright_stars() -> Self {
        Self {
            stars: BRIGHT_STARS.iter().copied().take(MAX_CATALOG_STARS).collect(),
        }
    }

    /// Look up a star by identifier (ASCII case-insensitive)
    pub fn get(&self, id: &str) -> Option<&CatalogStar> {
        self.stars.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogStar> {
        self.stars.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// True when the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
