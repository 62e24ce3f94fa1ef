//! Sponsored transaction building and signing.
//!
//! Every user action funnels through one of two signing paths:
//!
//! - **External wallet**: the intent gets a sender, and the connected wallet
//!   signs and executes it directly. The outcome is the executed
//!   transaction's digest.
//! - **Delegated key**: the backend sponsor pays gas. The intent gets the
//!   sponsor as gas owner, is built to final bytes, signed locally with the
//!   cached delegated key, and the signed payload is handed to the backend
//!   for execution.
//!
//! The two paths produce incompatible artifacts, so the result is a tagged
//! union the caller must match on; neither path retries or re-signs on its
//! own, and a duplicate invocation simply produces a second transaction.

use crate::api::{ApiClient, SponsoredExecution};
use crate::error::WalletError;
use crate::keystore::{load_signing_key, KeyStore};
use crate::signer::{extract_digest, WalletSigner};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;
use tanda_crypto::{derive_address, sign_bytes};
use tanda_tx::{ObjectResolver, TransactionIntent};
use tanda_types::{Address, NetworkId, TxDigest};
use tracing::{debug, error};

/// Where the sponsor's gas-owner address comes from. Production uses the
/// backend API; tests inject a fake.
#[allow(async_fn_in_trait)]
pub trait SponsorSource {
    async fn sponsor_address(&self) -> Result<Address, WalletError>;
}

/// Final transaction bytes and the user's signature over them, base64-encoded
/// for the sponsored-execution endpoint.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SignedPayload {
    #[serde(rename = "txBytes")]
    pub tx_bytes: String,
    #[serde(rename = "userSignature")]
    pub signature: String,
}

/// The outcome of a signing flow. The two variants are not interchangeable:
/// a direct outcome is already executed, a delegated one still has to be
/// submitted to the backend.
#[derive(Clone, Debug)]
pub enum TxOutcome {
    /// Executed by the external wallet; nothing left to submit.
    Direct { digest: TxDigest },
    /// Signed locally; must be submitted for sponsored execution.
    Delegated(SignedPayload),
}

/// What the caller gets back once a transaction has been executed, by either
/// path.
#[derive(Clone, Debug)]
pub struct ExecutionReceipt {
    pub digest: Option<TxDigest>,
    pub effects: Option<Value>,
}

/// Build and sign `intent` with the delegated key cached for `subject`,
/// sponsored by the backend.
///
/// The key is loaded and checked before anything touches the network: a
/// missing record fails with [`WalletError::AuthRequired`] and a record that
/// does not derive `user` fails with [`WalletError::KeyMismatch`], both
/// without any sponsor lookup. The returned payload's bytes are final; they
/// must reach the backend unmodified or the signature will not verify.
///
/// The intent's gas budget is serialized as-is: set one beforehand (see
/// [`WalletConfig::apply_to`](crate::config::WalletConfig::apply_to)) or the
/// standard default applies.
pub async fn sign_delegated<K, S, R>(
    intent: &mut TransactionIntent,
    user: &Address,
    subject: &str,
    store: &K,
    sponsor: &S,
    resolver: &R,
) -> Result<TxOutcome, WalletError>
where
    K: KeyStore,
    S: SponsorSource,
    R: ObjectResolver,
{
    let keypair = load_signing_key(store, subject)?.ok_or(WalletError::AuthRequired)?;
    if derive_address(&keypair.public) != *user {
        return Err(WalletError::KeyMismatch);
    }

    let sponsor_address = sponsor.sponsor_address().await?;
    debug!(user = %user, sponsor = %sponsor_address, "building sponsored transaction");

    intent.set_sender(*user);
    intent.set_gas_owner(sponsor_address);

    let bytes = intent.build(resolver).await?;
    let signature = sign_bytes(&bytes, &keypair.private);

    Ok(TxOutcome::Delegated(SignedPayload {
        tx_bytes: BASE64.encode(&bytes),
        signature: signature.to_base64(),
    }))
}

/// Hand `intent` to the connected external wallet for signing and execution.
///
/// The wallet pays its own gas, so no gas owner is set. The wallet's raw
/// result is adapted to a digest; a result with no digest under any known
/// field is an error, logged with the raw result for diagnosis.
pub async fn sign_with_wallet<W: WalletSigner>(
    intent: &mut TransactionIntent,
    user: &Address,
    signer: &W,
    network: NetworkId,
) -> Result<TxOutcome, WalletError> {
    intent.set_sender(*user);

    let result = signer.sign_and_execute(intent, network.chain()).await?;
    match extract_digest(&result) {
        Some(digest) => {
            debug!(user = %user, digest = %digest, "wallet executed transaction");
            Ok(TxOutcome::Direct { digest })
        }
        None => {
            error!(user = %user, result = %result, "wallet result carried no digest");
            Err(WalletError::MissingDigest)
        }
    }
}

/// Drive an outcome to an execution receipt.
///
/// A direct outcome is already executed; a delegated one is submitted to the
/// backend's sponsored-execution endpoint.
pub async fn submit(outcome: TxOutcome, api: &ApiClient) -> Result<ExecutionReceipt, WalletError> {
    match outcome {
        TxOutcome::Direct { digest } => Ok(ExecutionReceipt {
            digest: Some(digest),
            effects: None,
        }),
        TxOutcome::Delegated(payload) => {
            let SponsoredExecution {
                success,
                digest,
                effects,
                error,
            } = api.execute_sponsored(&payload).await?;
            if !success {
                return Err(WalletError::Api(
                    error.unwrap_or_else(|| "sponsored execution failed".to_string()),
                ));
            }
            Ok(ExecutionReceipt {
                digest: digest.and_then(TxDigest::new),
                effects,
            })
        }
    }
}
