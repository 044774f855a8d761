//! DOM element bindings.
//!
//! All fields are resolved once at startup. Cards and their buttons are
//! rendered later and are looked up by their `data-*` attributes instead.

use gloo_utils::document;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_typed<T: JsCast>(selector: &str) -> Option<T> {
    query(selector).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn create(tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document().create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_button(btn: &HtmlButtonElement, label: &str, enabled: bool) {
    btn.set_text_content(Some(label));
    btn.set_disabled(!enabled);
}

/// Adopt button of the card rendered for pet `index`.
pub fn adopt_button(index: usize) -> Option<HtmlButtonElement> {
    query_typed(&format!(".adopt-btn[data-id=\"{index}\"]"))
}

/// Adopter line of the card rendered for pet `index`.
pub fn adopter_info(index: usize) -> Option<Element> {
    query(&format!("[data-adopter-id=\"{index}\"]"))
}

// ── Elements struct ──

/// Static page elements the dApp drives.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub pets_row: Element,
    pub connect_button: HtmlButtonElement,
    pub account_display: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(concat!("missing #", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(concat!("missing button #", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            pets_row: get_el!("petsRow"),
            connect_button: get_button!("connectButton"),
            account_display: get_el!("accountDisplay"),
        })
    }
}
