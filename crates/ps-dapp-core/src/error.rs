use ps_api_types::{InvalidPetId, PetId};
use ps_chain_adoption::ContractError;
use ps_chain_client::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("user declined the account request")]
    Cancelled,

    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error("user declined the network switch")]
    SwitchDeclined,

    #[error("network switch failed: {0}")]
    SwitchFailed(#[source] ProviderError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ConnectError {
    pub fn user_message(&self, network_name: &str) -> String {
        match self {
            Self::Cancelled => "Wallet connection request was cancelled.".to_owned(),
            Self::SwitchDeclined => {
                format!("Cannot proceed without connecting to the {network_name}.")
            }
            Self::SwitchFailed(_) => {
                format!("Please manually switch to {network_name} in your wallet.")
            }
            Self::NoAccounts => "No accounts returned.".to_owned(),
            Self::Provider(_) => {
                "Failed to connect the wallet. Check the console for details.".to_owned()
            }
        }
    }
}

const INSUFFICIENT_FUNDS_MESSAGE: &str =
    "Transaction failed. Insufficient ETH (gas) in your wallet. Please acquire test ETH.";

/// How a failed adoption transaction is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    UserDeclined,
    InsufficientFunds,
    Unknown,
}

#[derive(Debug, Error)]
pub enum AdoptError {
    #[error(transparent)]
    InvalidPet(#[from] InvalidPetId),

    #[error("no wallet session")]
    NotConnected,

    #[error("pet {0} is already adopted")]
    AlreadyAdopted(PetId),

    #[error("adoption of pet {0} is still pending")]
    InProgress(PetId),

    #[error("adoption transaction failed: {0}")]
    Transaction(#[from] ContractError),
}

impl AdoptError {
    /// Only transaction failures are categorized; guard failures return `None`.
    pub fn category(&self) -> Option<FailureCategory> {
        let Self::Transaction(err) = self else {
            return None;
        };
        if err.provider_error().is_some_and(ProviderError::is_user_rejection) {
            return Some(FailureCategory::UserDeclined);
        }
        let detail = err
            .provider_error()
            .map_or_else(|| err.to_string(), ProviderError::message);
        if detail.to_lowercase().contains("insufficient funds") {
            Some(FailureCategory::InsufficientFunds)
        } else {
            Some(FailureCategory::Unknown)
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidPet(_) => "Unknown pet selected.".to_owned(),
            Self::NotConnected => {
                "Action Required: Please connect your Ethereum wallet before adopting!".to_owned()
            }
            Self::AlreadyAdopted(_) => "This pet has already been adopted.".to_owned(),
            Self::InProgress(_) => "This adoption is already being processed.".to_owned(),
            Self::Transaction(_) => match self.category() {
                Some(FailureCategory::UserDeclined) => {
                    "Adoption request was cancelled by the user.".to_owned()
                }
                Some(FailureCategory::InsufficientFunds) => INSUFFICIENT_FUNDS_MESSAGE.to_owned(),
                _ => "Transaction failed. An unknown error occurred. Please review the console."
                    .to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn rpc_failure(code: Option<i64>, message: &str) -> AdoptError {
        AdoptError::Transaction(ContractError::Provider(ProviderError::rpc(code, message)))
    }

    #[test]
    fn categorizes_transaction_failures() {
        assert_eq!(
            rpc_failure(Some(4001), "rejected").category(),
            Some(FailureCategory::UserDeclined)
        );
        let signature_denied = "MetaMask Tx Signature: User denied transaction signature.";
        assert_eq!(
            rpc_failure(None, signature_denied).category(),
            Some(FailureCategory::UserDeclined)
        );
        assert_eq!(
            rpc_failure(None, "user denied transaction").category(),
            Some(FailureCategory::UserDeclined)
        );
        assert_eq!(
            rpc_failure(Some(-32000), "insufficient funds for gas * price + value").category(),
            Some(FailureCategory::InsufficientFunds)
        );
        assert_eq!(
            rpc_failure(Some(-32000), "Insufficient funds for gas").category(),
            Some(FailureCategory::InsufficientFunds)
        );
        assert_eq!(
            rpc_failure(None, "INSUFFICIENT FUNDS").category(),
            Some(FailureCategory::InsufficientFunds)
        );
        assert_eq!(
            AdoptError::Transaction(ContractError::Reverted(B256::ZERO)).category(),
            Some(FailureCategory::Unknown)
        );
        assert_eq!(AdoptError::NotConnected.category(), None);
    }

    #[test]
    fn each_category_has_a_distinct_message() {
        let declined = rpc_failure(Some(4001), "rejected").user_message();
        let funds = rpc_failure(None, "insufficient funds").user_message();
        let unknown = rpc_failure(Some(-32603), "internal error").user_message();
        assert_eq!(declined, "Adoption request was cancelled by the user.");
        assert!(funds.contains("Insufficient ETH"));
        assert!(unknown.contains("unknown error"));
    }

    #[test]
    fn connect_messages_name_the_network() {
        let msg = ConnectError::SwitchDeclined.user_message("Sepolia Testnet");
        assert_eq!(msg, "Cannot proceed without connecting to the Sepolia Testnet.");
        let msg = ConnectError::SwitchFailed(ProviderError::rpc(Some(4001), "no"))
            .user_message("Sepolia Testnet");
        assert_eq!(msg, "Please manually switch to Sepolia Testnet in your wallet.");
    }

    #[test]
    fn missing_accounts_have_their_own_message() {
        assert_eq!(
            ConnectError::NoAccounts.user_message("Sepolia Testnet"),
            "No accounts returned."
        );
        assert_ne!(
            ConnectError::NoAccounts.user_message("Sepolia Testnet"),
            ConnectError::Provider(ProviderError::Unavailable).user_message("Sepolia Testnet")
        );
    }
}
