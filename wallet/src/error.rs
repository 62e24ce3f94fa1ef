//! Error type for the wallet core.

use tanda_tx::TxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// No delegated key is cached for the acting identity. The caller must
    /// re-run the login flow; nothing in this crate retries automatically.
    #[error("no delegated signing key for this identity; please log in again")]
    AuthRequired,

    /// A cached key exists but does not derive the requested signing address.
    #[error("delegated key does not match the signing address; please log in again")]
    KeyMismatch,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u128 },

    #[error("backend API error: {0}")]
    Api(String),

    #[error("ledger RPC error: {0}")]
    Ledger(String),

    /// Raised by `WalletSigner` implementations when the external wallet
    /// fails to execute or the user rejects the signing prompt.
    #[error("wallet execution failed: {0}")]
    WalletExecution(String),

    /// The external wallet reported success but its result carried no
    /// transaction identifier under any known field name.
    #[error("wallet result contained no transaction digest")]
    MissingDigest,

    #[error("key error: {0}")]
    Key(String),

    #[error(transparent)]
    Tx(#[from] TxError),

    #[error("{0}")]
    Other(String),
}
