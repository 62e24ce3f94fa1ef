//! Ledger account address type.
//!
//! Addresses are 32 bytes, displayed as `0x` + 64 lowercase hex characters.
//! Derived from an Ed25519 public key via Blake2b hashing (see `tanda-crypto`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 32-byte ledger account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

/// Error returned when parsing a malformed address or object id string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAddressError(pub String);

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid address: {}", self.0)
    }
}

impl std::error::Error for ParseAddressError {}

/// Decode `0x`-prefixed (or bare) hex into a 32-byte array.
pub(crate) fn parse_hex32(s: &str) -> Result<[u8; 32], ParseAddressError> {
    let hex_part = s.strip_prefix("0x").unwrap_or(s);
    if hex_part.len() != 64 {
        return Err(ParseAddressError(format!(
            "expected 64 hex characters, got {}",
            hex_part.len()
        )));
    }
    let bytes = hex::decode(hex_part).map_err(|e| ParseAddressError(e.to_string()))?;
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

impl Address {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Shortened display form for UI logs: `0x1234...5678`.
    pub fn truncated(&self) -> String {
        let full = self.to_string();
        let chars = crate::params::ADDRESS_DISPLAY_CHARS;
        // "0x" + first `chars` + "..." + last `chars`
        format!(
            "{}...{}",
            &full[..2 + chars],
            &full[full.len() - chars..]
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}..)", hex::encode(&self.0[..4]))
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex32(s).map(Self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
