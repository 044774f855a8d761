use alloy_primitives::{Address, B256, Bytes, U64, U256, address};
use alloy_sol_types::{SolCall, sol};
use ps_api_types::{
    AddEthereumChainParameter, CallRequest, ChainId, NativeCurrency, PET_COUNT, PetId,
    SwitchEthereumChainParameter, TransactionReceipt, TransactionRequest,
};
use ps_chain_client::{self as client, Eip1193Provider, ProviderError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

sol! {
    interface IAdoption {
        function adopt(uint256 petId) external returns (uint256);
        function adopters(uint256 index) external view returns (address);
        function getAdopters() external view returns (address[16]);
    }
}

pub const SEPOLIA_CHAIN_ID: ChainId = ChainId(11_155_111);
pub const SEPOLIA_NETWORK_NAME: &str = "Sepolia Testnet";

/// Adoption contract deployed on Sepolia.
pub const DEFAULT_ADOPTION_ADDRESS: Address =
    address!("0xfcC2dBA3D7663F40d75Ca119dbE79f94B064BBFd");

pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Network the dApp requires, plus what the wallet needs to add it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::sepolia()
    }
}

impl NetworkConfig {
    pub fn sepolia() -> Self {
        Self {
            chain_id: SEPOLIA_CHAIN_ID,
            chain_name: SEPOLIA_NETWORK_NAME.to_owned(),
            native_currency: NativeCurrency {
                name: "Sepolia ETH".to_owned(),
                symbol: "ETH".to_owned(),
                decimals: 18,
            },
            rpc_urls: vec!["https://sepolia.infura.io/v3/".to_owned()],
            block_explorer_urls: vec!["https://sepolia.etherscan.io".to_owned()],
        }
    }

    pub fn switch_parameter(&self) -> SwitchEthereumChainParameter {
        SwitchEthereumChainParameter {
            chain_id: self.chain_id,
        }
    }

    pub fn add_parameter(&self) -> AddEthereumChainParameter {
        AddEthereumChainParameter {
            chain_id: self.chain_id,
            chain_name: self.chain_name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_urls: self.rpc_urls.clone(),
            block_explorer_urls: self.block_explorer_urls.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolling {
    pub interval_ms: u32,
    pub attempts: u32,
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval_ms: 1_500,
            attempts: 120,
        }
    }
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to decode contract response: {0}")]
    Decode(#[from] alloy_sol_types::Error),

    #[error("transaction {0} reverted")]
    Reverted(B256),

    #[error("no receipt for transaction {tx_hash} after {attempts} polls")]
    ReceiptTimeout { tx_hash: B256, attempts: u32 },
}

impl ContractError {
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

/// Typed handle on the deployed Adoption contract, routed through the
/// user's wallet.
pub struct AdoptionContract<P> {
    provider: P,
    address: Address,
    polling: ReceiptPolling,
}

impl<P> AdoptionContract<P>
where
    P: Eip1193Provider,
{
    pub fn new(provider: P, address: Address, polling: ReceiptPolling) -> Self {
        Self {
            provider,
            address,
            polling,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn read<C: SolCall>(&self, call: &C) -> Result<C::Return, ContractError> {
        let req = CallRequest {
            to: self.address,
            data: Bytes::from(call.abi_encode()),
        };
        let output = client::call(&self.provider, &req).await?;
        Ok(C::abi_decode_returns(&output)?)
    }

    /// Batch read of all adoption slots.
    pub async fn get_adopters(&self) -> Result<[Address; PET_COUNT], ContractError> {
        self.read(&IAdoption::getAdoptersCall {}).await
    }

    /// Single-slot read, used when the batch getter is missing or failing.
    pub async fn adopters(&self, pet: PetId) -> Result<Address, ContractError> {
        self.read(&IAdoption::adoptersCall {
            index: U256::from(pet.index()),
        })
        .await
    }

    /// Submits `adopt(pet)` from `from` and waits until it is mined.
    pub async fn adopt(
        &self,
        pet: PetId,
        from: Address,
        gas_limit: u64,
    ) -> Result<TransactionReceipt, ContractError> {
        let call = IAdoption::adoptCall {
            petId: U256::from(pet.index()),
        };
        let req = TransactionRequest {
            from,
            to: self.address,
            data: Bytes::from(call.abi_encode()),
            gas: U64::from(gas_limit),
        };
        let tx_hash = client::send_transaction(&self.provider, &req).await?;
        info!(%tx_hash, pet = pet.index(), "adoption transaction submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.succeeded() {
            warn!(%tx_hash, "adoption transaction reverted");
            return Err(ContractError::Reverted(tx_hash));
        }
        Ok(receipt)
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<TransactionReceipt, ContractError> {
        for attempt in 0..self.polling.attempts {
            if let Some(receipt) = client::transaction_receipt(&self.provider, tx_hash).await? {
                return Ok(receipt);
            }
            debug!(%tx_hash, attempt, "receipt pending");
            self.provider.wait(self.polling.interval_ms).await;
        }
        Err(ContractError::ReceiptTimeout {
            tx_hash,
            attempts: self.polling.attempts,
        })
    }
}
