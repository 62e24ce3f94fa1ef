//! JSON-RPC client for a ledger fullnode.
//!
//! Covers the read surface the wallet needs: coin enumeration (paginated),
//! balance queries, and object reference resolution for transaction builds.
//! Everything else (room state, history, positions) goes through the backend
//! API instead.

use crate::coin_select::CoinObject;
use crate::error::WalletError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tanda_types::{Address, NetworkId, ObjectId, ObjectRef};
use tanda_tx::{ObjectResolver, TxError};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct LedgerClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinPage {
    data: Vec<CoinRecord>,
    next_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoinRecord {
    coin_object_id: ObjectId,
    version: u64,
    digest: String,
    // The node reports balances as decimal strings to avoid JSON number
    // precision loss.
    balance: String,
}

impl CoinRecord {
    fn into_coin(self) -> Result<CoinObject, WalletError> {
        let balance = self
            .balance
            .parse::<u64>()
            .map_err(|_| WalletError::Ledger(format!("bad coin balance: {}", self.balance)))?;
        Ok(CoinObject {
            object_ref: ObjectRef::new(self.coin_object_id, self.version, self.digest),
            balance,
        })
    }
}

impl LedgerClient {
    pub fn new(url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| WalletError::Ledger(format!("http client setup: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn for_network(network: NetworkId) -> Result<Self, WalletError> {
        Self::new(network.fullnode_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Ledger(format!("{method}: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Ledger(format!(
                "{method}: HTTP {}",
                response.status()
            )));
        }

        let mut envelope: Value = response
            .json()
            .await
            .map_err(|e| WalletError::Ledger(format!("{method}: invalid response: {e}")))?;

        if let Some(error) = envelope.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error");
            return Err(WalletError::Ledger(format!("{method}: {message}")));
        }

        Ok(envelope["result"].take())
    }

    /// One page of the owner's coins of `coin_type`.
    async fn get_coins(
        &self,
        owner: &Address,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<(Vec<CoinObject>, Option<String>), WalletError> {
        let result = self
            .rpc_call(
                "ledger_getCoins",
                json!([owner.to_string(), coin_type, cursor]),
            )
            .await?;

        let page: CoinPage = serde_json::from_value(result)
            .map_err(|e| WalletError::Ledger(format!("ledger_getCoins: bad page: {e}")))?;

        let coins = page
            .data
            .into_iter()
            .map(CoinRecord::into_coin)
            .collect::<Result<Vec<_>, _>>()?;
        let next = if page.has_next_page {
            page.next_cursor
        } else {
            None
        };
        Ok((coins, next))
    }

    /// All of the owner's coins of `coin_type`, following pagination.
    pub async fn get_all_coins(
        &self,
        owner: &Address,
        coin_type: &str,
    ) -> Result<Vec<CoinObject>, WalletError> {
        let mut all = Vec::new();
        let mut cursor = None;
        loop {
            let (mut coins, next) = self.get_coins(owner, coin_type, cursor).await?;
            all.append(&mut coins);
            match next {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }
        debug!(owner = %owner, coin_type, count = all.len(), "enumerated coins");
        Ok(all)
    }

    /// Total balance across all the owner's coins of `coin_type`.
    pub async fn get_balance(&self, owner: &Address, coin_type: &str) -> Result<u128, WalletError> {
        let result = self
            .rpc_call(
                "ledger_getBalance",
                json!([owner.to_string(), coin_type]),
            )
            .await?;

        let total = result
            .get("totalBalance")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                WalletError::Ledger("ledger_getBalance: missing totalBalance".to_string())
            })?;
        total
            .parse::<u128>()
            .map_err(|_| WalletError::Ledger(format!("ledger_getBalance: bad total: {total}")))
    }

    /// Resolve the current `(id, version, digest)` reference for an object.
    pub async fn get_object(&self, id: &ObjectId) -> Result<ObjectRef, WalletError> {
        let result = self
            .rpc_call("ledger_getObject", json!([id.to_string()]))
            .await?;

        #[derive(Deserialize)]
        struct ObjectInfo {
            version: u64,
            digest: String,
        }

        let info: ObjectInfo = serde_json::from_value(result)
            .map_err(|e| WalletError::Ledger(format!("ledger_getObject: bad object: {e}")))?;
        Ok(ObjectRef::new(*id, info.version, info.digest))
    }
}

impl ObjectResolver for LedgerClient {
    async fn resolve(&self, id: &ObjectId) -> Result<ObjectRef, TxError> {
        self.get_object(id)
            .await
            .map_err(|e| TxError::Resolve(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_record_parses_wire_shape() {
        let id = ObjectId::new([7u8; 32]);
        let json = format!(
            r#"{{"coinObjectId":"{id}","version":12,"digest":"9WzSXdEEJp","balance":"2500000"}}"#
        );
        let record: CoinRecord = serde_json::from_str(&json).unwrap();
        let coin = record.into_coin().unwrap();
        assert_eq!(coin.object_ref.id, id);
        assert_eq!(coin.object_ref.version, 12);
        assert_eq!(coin.balance, 2_500_000);
    }

    #[test]
    fn non_numeric_balance_is_an_error() {
        let id = ObjectId::new([7u8; 32]);
        let json = format!(
            r#"{{"coinObjectId":"{id}","version":1,"digest":"d","balance":"lots"}}"#
        );
        let record: CoinRecord = serde_json::from_str(&json).unwrap();
        assert!(record.into_coin().is_err());
    }

    #[test]
    fn coin_page_parses_pagination_fields() {
        let json = r#"{"data":[],"nextCursor":"abc","hasNextPage":true}"#;
        let page: CoinPage = serde_json::from_str(json).unwrap();
        assert!(page.has_next_page);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn client_targets_network_fullnode() {
        let client = LedgerClient::for_network(NetworkId::Testnet).unwrap();
        assert_eq!(client.url(), NetworkId::Testnet.fullnode_url());
    }
}
