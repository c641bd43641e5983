//! DOM Helpers
//!
//! Thin wrappers over `web_sys` lookups used by the page modules. Lookups
//! return `Option` because every element in the page contract is optional.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::{ClientError, ClientResult};

pub fn window() -> ClientResult<web_sys::Window> {
    web_sys::window().ok_or_else(|| ClientError::Dom("no window".to_string()))
}

pub fn document() -> ClientResult<Document> {
    window()?
        .document()
        .ok_or_else(|| ClientError::Dom("no document".to_string()))
}

pub fn body() -> Option<HtmlElement> {
    document().ok()?.body()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_as<T: JsCast>(id: &str) -> Option<T> {
    by_id(id)?.dyn_into::<T>().ok()
}

/// Set an element's text; returns false when the element is absent
pub fn set_text(id: &str, text: &str) -> bool {
    match by_id(id) {
        Some(el) => {
            el.set_text_content(Some(text));
            true
        }
        None => false,
    }
}

/// Show or hide an element through its inline `display` style
pub fn set_visible(id: &str, visible: bool) {
    if let Some(el) = by_id_as::<HtmlElement>(id) {
        let style = el.style();
        let result = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
        if let Err(err) = result {
            log::debug!("[DOM] could not toggle #{}: {:?}", id, err);
        }
    }
}

/// Current value of an `<input>` or `<textarea>`
pub fn field_value(id: &str) -> Option<String> {
    let el = by_id(id)?;
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

/// Blocking alert; silently skipped if the browser refuses
pub fn alert(message: &str) {
    if let Ok(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

/// Blocking confirmation; a refused dialog counts as "no"
pub fn confirm(message: &str) -> bool {
    window()
        .ok()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn reload() {
    if let Ok(win) = window() {
        if let Err(err) = win.location().reload() {
            log::warn!("[DOM] reload failed: {:?}", err);
        }
    }
}

pub fn navigate(url: &str) -> ClientResult<()> {
    window()?
        .location()
        .set_href(url)
        .map_err(|e| ClientError::dom(&e))
}
