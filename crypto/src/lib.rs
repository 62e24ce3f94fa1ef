//! Cryptographic primitives for the tanda client.
//!
//! - **Ed25519** for transaction signing and verification
//! - **SHA-256** for deterministic seed derivation from an identity subject
//! - **Blake2b** for address derivation from a public key

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use hash::{blake2b_256, sha256};
pub use keys::{
    generate_keypair, keypair_for_subject, keypair_from_private, keypair_from_seed,
    public_from_private,
};
pub use sign::{sign_bytes, verify_signature};
