//! `window.ethereum` as an [`Eip1193Provider`].

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use gloo_utils::window;
use js_sys::{Function, Object, Promise, Reflect};
use ps_chain_client::{Eip1193Provider, ProviderError};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Handle on the wallet the browser extension injected into the page.
#[derive(Clone)]
pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// `None` when no wallet extension is installed.
    pub fn detect() -> Option<Self> {
        let ethereum = Reflect::get(&window(), &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { ethereum })
    }

    fn method(&self, name: &str) -> Result<Function, JsValue> {
        Reflect::get(&self.ethereum, &JsValue::from_str(name))?.dyn_into::<Function>()
    }

    async fn request_js(&self, method: &str, params: JsValue) -> Result<JsValue, JsValue> {
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))?;
        Reflect::set(&args, &JsValue::from_str("params"), &params)?;
        let promise = self
            .method("request")?
            .call1(&self.ethereum, &args)?
            .dyn_into::<Promise>()?;
        JsFuture::from(promise).await
    }

    /// Subscribes `callback` to a provider event such as `chainChanged`.
    /// The listener lives for the rest of the page.
    pub fn on(&self, event: &str, callback: Closure<dyn FnMut(JsValue)>) -> Result<(), JsValue> {
        self.method("on")?.call2(
            &self.ethereum,
            &JsValue::from_str(event),
            callback.as_ref().unchecked_ref(),
        )?;
        callback.forget();
        Ok(())
    }
}

/// Wallet errors arrive as `{ code, message }` objects, occasionally as bare
/// strings.
fn provider_error(err: JsValue) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .map(|code| code as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    ProviderError::rpc(code, message)
}

fn invalid(method: &str, reason: impl ToString) -> ProviderError {
    ProviderError::InvalidResponse {
        method: method.to_owned(),
        reason: reason.to_string(),
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| invalid(method, err))?;
        let reply = self.request_js(method, params).await.map_err(provider_error)?;
        if reply.is_undefined() || reply.is_null() {
            return Ok(Value::Null);
        }
        let reply: Value =
            serde_wasm_bindgen::from_value(reply).map_err(|err| invalid(method, err))?;
        debug!(method, %reply, "wallet reply");
        Ok(reply)
    }

    async fn wait(&self, millis: u32) {
        TimeoutFuture::new(millis).await;
    }
}
