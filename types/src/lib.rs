//! Fundamental types for the tanda client core.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: ledger addresses, object identifiers and references, coin
//! amounts, transaction digests, signing keys, network identifiers,
//! timestamps, and application constants.

pub mod address;
pub mod amount;
pub mod digest;
pub mod keys;
pub mod network;
pub mod object;
pub mod params;
pub mod strategy;
pub mod time;

pub use address::Address;
pub use amount::CoinAmount;
pub use digest::TxDigest;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkId;
pub use object::{ObjectId, ObjectRef};
pub use time::Timestamp;
