//! Cryptographic key types for identity and transaction signing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte Ed25519 public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

/// A 32-byte Ed25519 private key (secret seed).
///
/// Intentionally implements neither `Debug`, `Clone`, nor `Serialize` so key
/// bytes cannot leak through logging or wire types. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// An Ed25519 key pair.
///
/// Construct via `tanda_crypto::generate_keypair()`,
/// `tanda_crypto::keypair_from_seed()`, or
/// `tanda_crypto::keypair_for_subject()`. This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    pub fn from_base64(s: &str) -> Option<Self> {
        let bytes = BASE64.decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl PrivateKey {
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    pub fn from_base64(s: &str) -> Option<Self> {
        let bytes = BASE64.decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Base64 encoding used for the sponsored-execution wire format.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    pub fn from_base64(s: &str) -> Option<Self> {
        let bytes = BASE64.decode(s).ok()?;
        let arr: [u8; 64] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

// Signatures cross the HTTP boundary as base64 strings.
impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_base64(&s)
            .ok_or_else(|| serde::de::Error::custom("expected base64-encoded 64-byte signature"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_base64_roundtrip() {
        let sig = Signature([0x5a; 64]);
        let s = sig.to_base64();
        assert_eq!(Signature::from_base64(&s).unwrap(), sig);
    }

    #[test]
    fn signature_serde_is_base64_string() {
        let sig = Signature([1u8; 64]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", sig.to_base64()));
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn signature_rejects_wrong_length() {
        let short = BASE64.encode([0u8; 10]);
        assert!(Signature::from_base64(&short).is_none());
    }

    #[test]
    fn public_key_base64_roundtrip() {
        let pk = PublicKey([9u8; 32]);
        assert_eq!(PublicKey::from_base64(&pk.to_base64()).unwrap(), pk);
    }

    #[test]
    fn private_key_base64_roundtrip() {
        let sk = PrivateKey([3u8; 32]);
        let decoded = PrivateKey::from_base64(&sk.to_base64()).unwrap();
        assert_eq!(decoded.0, sk.0);
    }
}
