//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).

use crate::provider::InjectedProvider;
use crate::view::PageView;
use gloo_storage::{LocalStorage, Storage, errors::StorageError};
use ps_dapp_core::{AdoptionController, DappConfig};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

/// localStorage key holding a JSON [`DappConfig`] override.
pub const CONFIG_KEY: &str = "ps_dapp_config";

pub type PageController = AdoptionController<InjectedProvider, PageView>;

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<PageController>>> = const { RefCell::new(None) };
}

pub fn set_controller(controller: Rc<PageController>) {
    CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));
}

pub fn controller() -> Option<Rc<PageController>> {
    CONTROLLER.with(|c| c.borrow().clone())
}

/// Defaults, unless the page's localStorage carries an override. A broken
/// override is logged and ignored.
pub fn load_config() -> DappConfig {
    match LocalStorage::get::<DappConfig>(CONFIG_KEY) {
        Ok(config) => {
            info!(contract = %config.contract_address, "using stored dApp config");
            config
        }
        Err(StorageError::KeyNotFound(_)) => DappConfig::default(),
        Err(err) => {
            warn!(%err, key = CONFIG_KEY, "ignoring invalid stored config");
            DappConfig::default()
        }
    }
}
