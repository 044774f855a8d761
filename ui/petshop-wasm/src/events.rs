//! Event binding.
//!
//! Wires the page and wallet listeners. Handlers look the controller up in
//! [`state`](crate::state) and run async work via
//! `wasm_bindgen_futures::spawn_local`.

use crate::dom::Elements;
use crate::provider::InjectedProvider;
use crate::state::{self, PageController};
use alloy_primitives::Address;
use ps_api_types::ChainId;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Helper: attach an async click handler that receives the controller.
macro_rules! on_click_async {
    ($el:expr, $handler:expr) => {{
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let Some(controller) = state::controller() else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                $handler(controller).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

async fn connect(controller: Rc<PageController>) {
    // Failures have already been reported to the user.
    let _ = controller.connect_wallet().await;
}

/// Pet index of the adopt button under a click, if any.
fn clicked_pet(event: &web_sys::MouseEvent) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(".adopt-btn").ok()??;
    button.get_attribute("data-id")?.parse().ok()
}

/// Bind page listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    on_click_async!(els.connect_button, connect);

    // Cards are re-rendered, so adopt clicks are delegated to the container.
    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        let Some(index) = clicked_pet(&event) else {
            return;
        };
        let Some(controller) = state::controller() else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            let _ = controller.submit_adoption(index).await;
        });
    }) as Box<dyn FnMut(_)>);
    els.pets_row
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();

    Ok(())
}

/// Bind `chainChanged` and `accountsChanged` on the injected wallet.
pub fn bind_provider_events(provider: &InjectedProvider) -> Result<(), JsValue> {
    provider.on(
        "chainChanged",
        Closure::wrap(Box::new(move |payload: JsValue| {
            let chain_id = payload
                .as_string()
                .and_then(|raw| raw.parse::<ChainId>().ok());
            if let Some(controller) = state::controller() {
                controller.on_chain_changed(chain_id);
            }
        }) as Box<dyn FnMut(JsValue)>),
    )?;

    provider.on(
        "accountsChanged",
        Closure::wrap(Box::new(move |payload: JsValue| {
            let accounts = parse_accounts(&payload);
            debug!(count = accounts.len(), "accountsChanged");
            let Some(controller) = state::controller() else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                controller.on_accounts_changed(accounts).await;
            });
        }) as Box<dyn FnMut(JsValue)>),
    )?;

    Ok(())
}

fn parse_accounts(payload: &JsValue) -> Vec<Address> {
    let Some(array) = payload.dyn_ref::<js_sys::Array>() else {
        warn!("accountsChanged payload is not an array");
        return Vec::new();
    };
    array
        .iter()
        .filter_map(|value| value.as_string())
        .filter_map(|raw| raw.parse::<Address>().ok())
        .collect()
}
