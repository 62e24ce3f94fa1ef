//! Network identifier and per-network endpoints.

use serde::{Deserialize, Serialize};

/// Identifies which ledger network the client targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Mainnet,
    /// The public test network.
    #[default]
    Testnet,
    /// The bleeding-edge development network.
    Devnet,
    /// A locally-run node.
    Local,
}

impl NetworkId {
    /// Fullnode RPC endpoint for this network.
    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://fullnode.mainnet.tanda.network:443",
            Self::Testnet => "https://fullnode.testnet.tanda.network:443",
            Self::Devnet => "https://fullnode.devnet.tanda.network:443",
            Self::Local => "http://127.0.0.1:9000",
        }
    }

    /// Chain identifier passed to external wallet integrations,
    /// e.g. `tanda:testnet`.
    pub fn chain(&self) -> &'static str {
        match self {
            Self::Mainnet => "tanda:mainnet",
            Self::Testnet => "tanda:testnet",
            Self::Devnet => "tanda:devnet",
            Self::Local => "tanda:localnet",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Local => "local",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_testnet() {
        assert_eq!(NetworkId::default(), NetworkId::Testnet);
    }

    #[test]
    fn chain_identifiers() {
        assert_eq!(NetworkId::Testnet.chain(), "tanda:testnet");
        assert_eq!(NetworkId::Mainnet.chain(), "tanda:mainnet");
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&NetworkId::Devnet).unwrap();
        assert_eq!(json, "\"devnet\"");
        let back: NetworkId = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(back, NetworkId::Local);
    }
}
