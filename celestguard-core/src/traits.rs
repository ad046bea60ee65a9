//! Shared traits for observations and inputs

use crate::errors::GuardResult;

/// Values that can be checked for numeric sanity
pub trait Validatable {
    /// Check the value is usable (not NaN, not infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Caller-facing input checks
///
/// Implementations reject malformed values with `InvalidInput` and return a
/// normalized copy (azimuths and headings wrapped into `[0, 360)`). Nothing
/// downstream of `sanitize` re-checks ranges.
pub trait Sanitize: Sized {
    /// Validate and normalize
    fn sanitize(&self) -> GuardResult<Self>;
}

/// The two angular fields an observation contributes to a signed message
///
/// Bearings contribute azimuth and elevation. Headings contribute the heading
/// and a zero pad so that a sensor's self-reported confidence never changes
/// its signature.
pub trait AngularFields {
    /// Fields in packing order, degrees
    fn angular_fields(&self) -> [f64; 2];
}
