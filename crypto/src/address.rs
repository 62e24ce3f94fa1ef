//! Account address derivation from public keys.
//!
//! Address = Blake2b-256(scheme_flag || public_key), rendered as
//! `0x` + 64 hex characters. The flag byte distinguishes signature schemes so
//! a future scheme can never produce an address colliding with Ed25519.

use crate::hash::blake2b_256;
use tanda_types::{Address, PublicKey};

/// Scheme flag for Ed25519 keys.
const ED25519_FLAG: u8 = 0x00;

/// Derive the account address owned by an Ed25519 public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let mut preimage = [0u8; 33];
    preimage[0] = ED25519_FLAG;
    preimage[1..].copy_from_slice(public_key.as_bytes());
    Address::new(blake2b_256(&preimage))
}
