//! Ledger object identifiers and versioned references.
//!
//! Every on-ledger value (coin objects, rooms, vaults, player positions, the
//! shared clock) is addressed by a 32-byte object id. A transaction must pin
//! each object it touches to a concrete `(id, version, digest)` reference so
//! the serialized bytes commit to the exact object state observed.

use crate::address::{parse_hex32, ParseAddressError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 32-byte ledger object id, displayed as `0x` + 64 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 32]);

impl ObjectId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(0x{}..)", hex::encode(&self.0[..4]))
    }
}

impl FromStr for ObjectId {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex32(s).map(Self)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A fully-pinned object reference: id, version, and state digest.
///
/// The digest is the node's opaque content hash for the object at `version`.
/// References are resolved fresh per transaction build and are never cached
/// across user actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: ObjectId,
    pub version: u64,
    pub digest: String,
}

impl ObjectRef {
    pub fn new(id: ObjectId, version: u64, digest: impl Into<String>) -> Self {
        Self {
            id,
            version,
            digest: digest.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_parse_roundtrip() {
        let id = ObjectId::new([0x42; 32]);
        let parsed: ObjectId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn object_id_rejects_short_input() {
        assert!("0x6".parse::<ObjectId>().is_err());
    }

    #[test]
    fn object_ref_serde_roundtrip() {
        let r = ObjectRef::new(ObjectId::new([1u8; 32]), 17, "9WzSXdEEJp");
        let json = serde_json::to_string(&r).unwrap();
        let back: ObjectRef = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
