//! Wallet configuration.

use crate::error::WalletError;
use serde::Deserialize;
use tanda_tx::TransactionIntent;
use tanda_types::params::GAS_BUDGET;
use tanda_types::{Address, NetworkId};

/// Client configuration, loadable from a TOML file. Every field has a
/// default, so an empty file (or no file) yields a working local setup.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
    /// Backend API base URL.
    pub api_url: String,
    /// Which ledger network to target.
    pub network: NetworkId,
    /// The published room contract package. Absent until deployment.
    pub package_id: Option<Address>,
    /// Gas budget applied to intents via [`WalletConfig::apply_to`].
    pub gas_budget: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
            network: NetworkId::default(),
            package_id: None,
            gas_budget: GAS_BUDGET,
        }
    }
}

impl WalletConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Other(format!("bad config: {e}")))
    }

    /// The fullnode URL for the configured network.
    pub fn fullnode_url(&self) -> &'static str {
        self.network.fullnode_url()
    }

    /// Apply the configured gas budget to an intent before it is signed.
    pub fn apply_to(&self, intent: &mut TransactionIntent) {
        intent.set_gas_budget(self.gas_budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = WalletConfig::from_toml_str("").unwrap();
        assert_eq!(config.api_url, "http://localhost:3001");
        assert_eq!(config.network, NetworkId::Testnet);
        assert!(config.package_id.is_none());
        assert_eq!(config.gas_budget, GAS_BUDGET);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = WalletConfig::from_toml_str(
            r#"
            api_url = "https://api.tanda.example"
            network = "devnet"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://api.tanda.example");
        assert_eq!(config.network, NetworkId::Devnet);
        assert_eq!(config.gas_budget, GAS_BUDGET);
    }

    #[test]
    fn package_id_parses_as_address() {
        let addr = Address::new([0x77; 32]);
        let toml = format!("package_id = \"{addr}\"");
        let config = WalletConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.package_id, Some(addr));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(WalletConfig::from_toml_str("gas_limit = 5").is_err());
    }

    #[test]
    fn apply_to_sets_intent_gas_budget() {
        let config = WalletConfig::from_toml_str("gas_budget = 42").unwrap();
        let mut intent = TransactionIntent::new();
        config.apply_to(&mut intent);
        assert_eq!(intent.gas_budget(), 42);
    }

    #[test]
    fn fullnode_url_follows_network() {
        let config = WalletConfig::from_toml_str("network = \"local\"").unwrap();
        assert_eq!(config.fullnode_url(), NetworkId::Local.fullnode_url());
    }
}
