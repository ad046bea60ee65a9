//! Message Layout
//!
//! ```text
//! offset  size  field
//! 0       8     timestamp, u64 ms since Unix epoch
//! 8       8     latitude, f64 degrees
//! 16      8     longitude, f64 degrees
//! 24      8     altitude, f64 meters
//! 32      8     first angular field, f64 degrees
//! 40      8     second angular field, f64 degrees
//! ```
//!
//! All fields little-endian, floats IEEE-754 binary64.

/// Packed message length in bytes.
pub const MESSAGE_BYTES: usize = 48;

/// Width of each packed field in bytes.
pub const FIELD_BYTES: usize = 8;
