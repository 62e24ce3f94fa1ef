//! Wallet core for the tanda group-savings client.
//!
//! Provides everything the front-end needs that is not a view:
//! - Delegated key storage and lifecycle (per identity subject)
//! - Coin selection for exact-amount deposits
//! - The sponsored transaction builder (delegated-key and external-wallet modes)
//! - Backend API client (sponsor lookup, sponsored execution, rooms, faucet)
//! - Ledger fullnode client (coins, balances, object resolution)

pub mod api;
pub mod coin_select;
pub mod config;
pub mod effects;
pub mod error;
pub mod keystore;
pub mod ledger;
pub mod signer;
pub mod sponsor;

pub use api::{ApiClient, SponsoredExecution};
pub use coin_select::{pick_coins, select_coins, CoinObject, CoinSelection};
pub use config::WalletConfig;
pub use effects::created_object_ids;
pub use error::WalletError;
pub use keystore::{FileKeyStore, KeyStore, MemoryKeyStore, StoredKey};
pub use ledger::LedgerClient;
pub use signer::{extract_digest, WalletSigner};
pub use sponsor::{
    sign_delegated, sign_with_wallet, submit, ExecutionReceipt, SignedPayload, SponsorSource,
    TxOutcome,
};
