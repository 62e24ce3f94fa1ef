//! Ed25519 key generation and deterministic derivation.

use crate::hash::sha256;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use tanda_types::{KeyPair, PrivateKey, PublicKey};

/// Domain separator mixed into the subject seed so keys derived here can never
/// collide with another application hashing the same identity subject.
const SUBJECT_SEED_SALT: &str = "tanda-wallet-v1";

/// Generate a new Ed25519 key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the delegated signing key pair for an identity-provider subject id.
///
/// Seed = SHA-256("tanda-wallet-v1:" + subject). The same subject always
/// yields the same key pair, so the same login always yields the same address.
pub fn keypair_for_subject(subject: &str) -> KeyPair {
    let seed_input = format!("{}:{}", SUBJECT_SEED_SALT, subject);
    let seed = sha256(seed_input.as_bytes());
    keypair_from_seed(&seed)
}
