use alloy_primitives::Address;
use ps_chain_adoption::{DEFAULT_ADOPTION_ADDRESS, DEFAULT_GAS_LIMIT, NetworkConfig, ReceiptPolling};
use serde::{Deserialize, Serialize};

/// Runtime settings. Every field has a default, so a partial JSON override
/// only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DappConfig {
    pub network: NetworkConfig,
    pub contract_address: Address,
    pub gas_limit: u64,
    /// Pause after a chain switch so the wallet can finish applying it.
    pub network_settle_ms: u32,
    pub receipt_poll_interval_ms: u32,
    pub receipt_poll_attempts: u32,
}

impl Default for DappConfig {
    fn default() -> Self {
        let polling = ReceiptPolling::default();
        Self {
            network: NetworkConfig::sepolia(),
            contract_address: DEFAULT_ADOPTION_ADDRESS,
            gas_limit: DEFAULT_GAS_LIMIT,
            network_settle_ms: 1_000,
            receipt_poll_interval_ms: polling.interval_ms,
            receipt_poll_attempts: polling.attempts,
        }
    }
}

impl DappConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn receipt_polling(&self) -> ReceiptPolling {
        ReceiptPolling {
            interval_ms: self.receipt_poll_interval_ms,
            attempts: self.receipt_poll_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_api_types::ChainId;

    #[test]
    fn defaults_target_sepolia() {
        let config = DappConfig::default();
        assert_eq!(config.network.chain_id, ChainId(0xaa36a7));
        assert_eq!(config.network.chain_name, "Sepolia Testnet");
        assert_eq!(config.gas_limit, 300_000);
        assert_eq!(config.contract_address, DEFAULT_ADOPTION_ADDRESS);
    }

    #[test]
    fn partial_override_keeps_defaults() -> anyhow::Result<()> {
        let config = DappConfig::from_json(
            r#"{
                "contract_address": "0x000000000000000000000000000000000000beef",
                "network": { "chain_name": "Local" }
            }"#,
        )?;
        assert_eq!(
            config.contract_address,
            "0x000000000000000000000000000000000000beef".parse::<Address>()?
        );
        assert_eq!(config.network.chain_name, "Local");
        assert_eq!(config.network.chain_id, ChainId(0xaa36a7));
        assert_eq!(config.network_settle_ms, 1_000);
        Ok(())
    }

    #[test]
    fn malformed_override_is_rejected() {
        assert!(DappConfig::from_json("{ not json").is_err());
    }
}
