//! Pet Shop dApp WASM frontend.
//!
//! Binds the adoption controller to the page and to the wallet the browser
//! injected as `window.ethereum`.

pub mod dom;
pub mod events;
pub mod provider;
pub mod state;
pub mod view;

use ps_dapp_core::{AdoptionController, render_catalog, report_missing_provider};
use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    init()
}

/// Renders the catalog, then either wires the wallet or explains that one
/// is needed.
fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let view = view::PageView::new(els.clone());
    let config = state::load_config();

    let Some(provider) = provider::InjectedProvider::detect() else {
        warn!("no injected wallet found");
        render_catalog(&view);
        report_missing_provider(&view);
        return Ok(());
    };

    let controller = Rc::new(AdoptionController::new(provider.clone(), view, config));
    controller.render_catalog();
    state::set_controller(controller);

    events::bind_events(&els)?;
    events::bind_provider_events(&provider)?;
    info!("pet shop ready");
    Ok(())
}
