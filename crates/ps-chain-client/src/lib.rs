//! EIP-1193 wallet provider seam and typed wrappers for the RPC methods
//! the dApp consumes.

use alloy_primitives::{Address, B256, Bytes};
use async_trait::async_trait;
use ps_api_types::{
    AddEthereumChainParameter, CallRequest, ChainId, SwitchEthereumChainParameter,
    TransactionReceipt, TransactionRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// EIP-1193 / MetaMask: the requested chain has not been added to the wallet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no injected wallet provider")]
    Unavailable,

    #[error("wallet rpc error (code {code:?}): {message}")]
    Rpc { code: Option<i64>, message: String },

    #[error("unexpected response to {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl ProviderError {
    pub fn rpc(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => *code,
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Rpc { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Wallets signal a declined prompt with code 4001; some older ones only
    /// say so in the message, in varying case.
    pub fn is_user_rejection(&self) -> bool {
        self.code() == Some(USER_REJECTED_REQUEST)
            || self.message().to_lowercase().contains("user denied")
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN)
    }
}

/// A browser-injected wallet (`window.ethereum`) or anything that speaks
/// the same request interface.
#[async_trait(?Send)]
pub trait Eip1193Provider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Yield to the host event loop for roughly `millis` milliseconds.
    async fn wait(&self, millis: u32);
}

#[async_trait(?Send)]
impl<P: Eip1193Provider + ?Sized> Eip1193Provider for &P {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params).await
    }

    async fn wait(&self, millis: u32) {
        (**self).wait(millis).await
    }
}

#[async_trait(?Send)]
impl<P: Eip1193Provider + ?Sized> Eip1193Provider for Rc<P> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        (**self).request(method, params).await
    }

    async fn wait(&self, millis: u32) {
        (**self).wait(millis).await
    }
}

async fn request_typed<P, T>(provider: &P, method: &str, params: Value) -> Result<T, ProviderError>
where
    P: Eip1193Provider + ?Sized,
    T: DeserializeOwned,
{
    debug!(method, %params, "wallet request");
    let raw = provider.request(method, params).await?;
    serde_json::from_value(raw).map_err(|err| ProviderError::InvalidResponse {
        method: method.to_owned(),
        reason: err.to_string(),
    })
}

fn to_param<T: Serialize>(method: &str, value: &T) -> Result<Value, ProviderError> {
    serde_json::to_value(value).map_err(|err| ProviderError::InvalidResponse {
        method: method.to_owned(),
        reason: err.to_string(),
    })
}

/// `eth_requestAccounts`: prompts the user to expose their accounts.
pub async fn request_accounts<P>(provider: &P) -> Result<Vec<Address>, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    request_typed(provider, "eth_requestAccounts", json!([])).await
}

/// `eth_chainId`
pub async fn chain_id<P>(provider: &P) -> Result<ChainId, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    request_typed(provider, "eth_chainId", json!([])).await
}

/// `wallet_switchEthereumChain` (EIP-3326)
pub async fn switch_chain<P>(
    provider: &P,
    param: &SwitchEthereumChainParameter,
) -> Result<(), ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    let method = "wallet_switchEthereumChain";
    let params = Value::Array(vec![to_param(method, param)?]);
    provider.request(method, params).await.map(|_| ())
}

/// `wallet_addEthereumChain` (EIP-3085)
pub async fn add_chain<P>(
    provider: &P,
    param: &AddEthereumChainParameter,
) -> Result<(), ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    let method = "wallet_addEthereumChain";
    let params = Value::Array(vec![to_param(method, param)?]);
    provider.request(method, params).await.map(|_| ())
}

/// `eth_call` against the latest block.
pub async fn call<P>(provider: &P, req: &CallRequest) -> Result<Bytes, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    let method = "eth_call";
    let params = json!([to_param(method, req)?, "latest"]);
    request_typed(provider, method, params).await
}

/// `eth_sendTransaction`; resolves to the transaction hash once the wallet
/// has signed and broadcast it.
pub async fn send_transaction<P>(
    provider: &P,
    req: &TransactionRequest,
) -> Result<B256, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    let method = "eth_sendTransaction";
    let params = Value::Array(vec![to_param(method, req)?]);
    request_typed(provider, method, params).await
}

/// `eth_getTransactionReceipt`; `None` while the transaction is pending.
pub async fn transaction_receipt<P>(
    provider: &P,
    tx_hash: B256,
) -> Result<Option<TransactionReceipt>, ProviderError>
where
    P: Eip1193Provider + ?Sized,
{
    request_typed(provider, "eth_getTransactionReceipt", json!([tx_hash])).await
}
