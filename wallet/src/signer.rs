//! External-wallet signing interface and result adaptation.
//!
//! In wallet mode the user's browser extension signs and executes the
//! transaction itself; this crate only hands it a populated intent and reads
//! the digest back out of whatever shape the wallet returns. Known wallets
//! disagree on where the digest lives, so extraction probes a fixed list of
//! locations.

use crate::error::WalletError;
use serde_json::Value;
use tanda_tx::TransactionIntent;
use tanda_types::TxDigest;

/// An external wallet that signs and executes a transaction on the user's
/// behalf. Implementations bridge to a browser extension or hardware device;
/// tests use in-process fakes.
#[allow(async_fn_in_trait)]
pub trait WalletSigner {
    /// Sign and execute `intent` on `chain`, returning the wallet's raw
    /// result object verbatim.
    async fn sign_and_execute(
        &self,
        intent: &TransactionIntent,
        chain: &str,
    ) -> Result<Value, WalletError>;
}

/// Pull a transaction digest out of a wallet execution result.
///
/// Probes, in order:
/// 1. `digest`
/// 2. `transactionDigest`
/// 3. `effects.transactionDigest`
/// 4. `effects.digest`
///
/// Returns `None` when none of these holds a non-empty string.
pub fn extract_digest(result: &Value) -> Option<TxDigest> {
    let candidates = [
        result.get("digest"),
        result.get("transactionDigest"),
        result.get("effects").and_then(|e| e.get("transactionDigest")),
        result.get("effects").and_then(|e| e.get("digest")),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find_map(TxDigest::new)
}
