//! Adoption UI controller.
//!
//! Everything here is browser-agnostic: the wallet is reached through
//! [`ps_chain_client::Eip1193Provider`] and the page through
//! [`AdoptionView`], so the flows run the same under `wasm32` and in tests.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

#[cfg(test)]
mod testing;

pub use catalog::{CATALOG, render_catalog};
pub use config::DappConfig;
pub use controller::{AdoptionController, WalletSession, report_missing_provider};
pub use error::{AdoptError, ConnectError, FailureCategory};
pub use view::AdoptionView;
