use alloy_primitives::{Address, B256, Bytes, U64};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of adoption slots in the deployed contract.
pub const PET_COUNT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pet {
    pub name: &'static str,
    pub breed: &'static str,
    pub age: &'static str,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("pet index {0} is outside the catalog (0..{PET_COUNT})")]
pub struct InvalidPetId(pub usize);

/// Index of a pet in the catalog, guaranteed to address a contract slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PetId(u8);

impl PetId {
    pub fn new(index: usize) -> Result<Self, InvalidPetId> {
        if index < PET_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(InvalidPetId(index))
        }
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn all() -> impl Iterator<Item = PetId> {
        (0..PET_COUNT as u8).map(PetId)
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionStatus {
    Unclaimed,
    Claimed(Address),
}

impl AdoptionStatus {
    pub fn from_adopter(adopter: Address) -> Self {
        if adopter.is_zero() {
            Self::Unclaimed
        } else {
            Self::Claimed(adopter)
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Claimed(_))
    }
}

/// Local mirror of the contract's fixed-size `adopters` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdopterTable {
    slots: [Address; PET_COUNT],
}

impl Default for AdopterTable {
    fn default() -> Self {
        Self {
            slots: [Address::ZERO; PET_COUNT],
        }
    }
}

impl AdopterTable {
    /// Builds a table from any read result: missing slots stay zero, extra
    /// slots are dropped.
    pub fn normalize<I>(adopters: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let mut table = Self::default();
        for (slot, adopter) in table.slots.iter_mut().zip(adopters) {
            *slot = adopter;
        }
        table
    }

    pub fn status(&self, pet: PetId) -> AdoptionStatus {
        AdoptionStatus::from_adopter(self.slots[pet.index()])
    }

    /// Folds a fresh read into the mirror. A claimed slot is never reset to
    /// zero since adoption cannot be undone on-chain.
    pub fn merge(&mut self, fresh: &AdopterTable) {
        for (known, incoming) in self.slots.iter_mut().zip(fresh.slots.iter()) {
            if !incoming.is_zero() || known.is_zero() {
                *known = *incoming;
            }
        }
    }

    pub fn record_claim(&mut self, pet: PetId, adopter: Address) {
        self.slots[pet.index()] = adopter;
    }

    pub fn clear(&mut self) {
        self.slots = [Address::ZERO; PET_COUNT];
    }

    pub fn iter(&self) -> impl Iterator<Item = (PetId, AdoptionStatus)> + '_ {
        PetId::all().map(|pet| (pet, self.status(pet)))
    }

    pub fn claimed_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_zero()).count()
    }
}

/// Shortens an address for display as `0x1234...abcd`. Values of ten
/// characters or fewer are returned unchanged.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid chain id: {0:?}")]
pub struct InvalidChainId(pub String);

/// EIP-155 chain id. Wallets report it as a `0x`-prefixed hex quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl ChainId {
    pub fn to_hex(self) -> String {
        format!("{:#x}", self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = InvalidChainId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed.map(ChainId).map_err(|_| InvalidChainId(s.to_owned()))
    }
}

impl Serialize for ChainId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ── Wallet RPC parameter types ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
    pub chain_id: ChainId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// EIP-3085 `wallet_addEthereumChain` parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub gas: U64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts carry no status and are treated as successful.
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|status| status != U64::ZERO)
    }
}
