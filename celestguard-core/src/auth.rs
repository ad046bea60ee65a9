//! Keyed Authenticator
//!
//! HMAC-SHA-512 over packed messages. The avalanche behaviour of the hash is
//! the whole point: one flipped input bit flips about half of the 512 output
//! bits, so Hamming distance between signatures says "same input or not"
//! and nothing about how close the inputs were. An attacker cannot shave a
//! spoofed position closer to the truth and watch the score improve.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::{
    codec::FixedMessage,
    constants::scoring::SIGNATURE_BYTES,
    errors::{GuardResult, IntegrityError},
};

type HmacSha512 = Hmac<Sha512>;

/// Shared secret, normalized to bytes
///
/// Text keys are taken as their UTF-8 bytes; binary keys are used as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length key
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SigningKey(<{} bytes redacted>)", self.0.len())
    }
}

impl From<&str> for SigningKey {
    fn from(key: &str) -> Self {
        Self(key.as_bytes().to_vec())
    }
}

impl From<String> for SigningKey {
    fn from(key: String) -> Self {
        Self(key.into_bytes())
    }
}

impl From<&[u8]> for SigningKey {
    fn from(key: &[u8]) -> Self {
        Self(key.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SigningKey {
    fn from(key: &[u8; N]) -> Self {
        Self(key.to_vec())
    }
}

impl From<Vec<u8>> for SigningKey {
    fn from(key: Vec<u8>) -> Self {
        Self(key)
    }
}

/// 512-bit keyed signature
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_BYTES]);

impl Signature {
    /// Raw signature bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_BYTES] {
        &self.0
    }

    /// Lowercase hex, two characters per byte
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Signs packed messages under one key
///
/// The key schedule runs once at construction; each `sign` clones the keyed
/// state, so concurrent callers never share a mutable MAC.
#[derive(Clone)]
pub struct Authenticator {
    mac: HmacSha512,
    key_len: usize,
}

impl Authenticator {
    /// Create an authenticator, rejecting empty keys
    pub fn new(key: impl Into<SigningKey>) -> GuardResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(IntegrityError::config("signing key must not be empty"));
        }

        let mac = HmacSha512::new_from_slice(key.as_bytes())
            .map_err(|_| IntegrityError::config("signing key rejected by HMAC"))?;

        Ok(Self {
            mac,
            key_len: key.len(),
        })
    }

    /// Sign a packed message
    pub fn sign(&self, message: &FixedMessage) -> Signature {
        let mut mac = self.mac.clone();
        mac.update(message.as_ref());

        let mut bytes = [0u8; SIGNATURE_BYTES];
        bytes.copy_from_slice(&mac.finalize().into_bytes());
        Signature(bytes)
    }
}

impl core::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator")
            .field("algorithm", &"HMAC-SHA-512")
            .field("key_len", &self.key_len)
            .finish()
    }
}
