//! Signature Codec
//!
//! Packs a navigation state and one observation into the fixed 48-byte
//! message that gets signed. The layout is documented in
//! [`crate::constants::codec`]; byte order is little-endian and floats are
//! IEEE-754 binary64 on every platform, so signatures reproduce anywhere.
//!
//! This is an identity-preserving transform, not a hash: two messages are
//! equal exactly when all six fields are bit-identical.

use crate::{
    constants::codec::{FIELD_BYTES, MESSAGE_BYTES},
    errors::{GuardResult, IntegrityError},
    traits::{AngularFields, Validatable},
    types::NavigationState,
};

/// Packed message ready for signing
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedMessage([u8; MESSAGE_BYTES]);

impl FixedMessage {
    /// Raw message bytes
    pub fn as_bytes(&self) -> &[u8; MESSAGE_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for FixedMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for FixedMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FixedMessage({})", hex::encode(self.0))
    }
}

/// Pack `state` and `observation` into a fixed-length message
///
/// NaN or infinite fields are rejected here rather than signed; a NaN would
/// otherwise sign like any other bit pattern and compare "equal" to itself.
pub fn pack<O: AngularFields + ?Sized>(state: &NavigationState, observation: &O) -> GuardResult<FixedMessage> {
    let timestamp_ms = state.timestamp_ms()?;
    let [first, second] = observation.angular_fields();

    let fields: [(&'static str, f64); 5] = [
        ("latitude_deg", state.latitude_deg),
        ("longitude_deg", state.longitude_deg),
        ("altitude_m", state.altitude_m),
        ("observation", first),
        ("observation", second),
    ];

    let mut bytes = [0u8; MESSAGE_BYTES];
    bytes[..FIELD_BYTES].copy_from_slice(&timestamp_ms.to_le_bytes());

    for (i, &(name, value)) in fields.iter().enumerate() {
        if !value.is_valid() {
            return Err(IntegrityError::invalid(name, "not a finite number"));
        }
        // -0.0 == 0.0, so both must pack to the same bits
        let canonical = value + 0.0;
        let start = FIELD_BYTES * (i + 1);
        bytes[start..start + FIELD_BYTES].copy_from_slice(&canonical.to_le_bytes());
    }

    Ok(FixedMessage(bytes))
}
