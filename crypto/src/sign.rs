//! Ed25519 signing and verification over serialized transaction bytes.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use tanda_types::{PrivateKey, PublicKey, Signature};

/// Sign a byte payload with a private key.
///
/// Ed25519 is deterministic: signing the same bytes with the same key always
/// produces the same signature. The payload must not be mutated after signing;
/// the sponsor verifies the signature over the exact bytes it receives.
pub fn sign_bytes(payload: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(payload).to_bytes())
}

/// Verify a signature against a payload and public key.
pub fn verify_signature(payload: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(payload, &sig).is_ok()
}
