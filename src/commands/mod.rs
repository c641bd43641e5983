//! Server Command Wrappers
//!
//! Frontend bindings to the ordering server's HTTP endpoints, organized by
//! domain. All calls are same-origin `fetch` requests.

mod orders;
mod staff;

use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::dom;
use crate::error::{ClientError, ClientResult};

// Re-export all public items
pub use orders::*;
pub use staff::*;

/// POST with an optional JSON body; resolves to the response text on 2xx
pub(crate) async fn post(url: &str, json_body: Option<String>) -> ClientResult<String> {
    let init = RequestInit::new();
    init.set_method("POST");
    if let Some(body) = json_body.as_deref() {
        init.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &init).map_err(|e| ClientError::dom(&e))?;
    if json_body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| ClientError::dom(&e))?;
    }

    let response: Response = JsFuture::from(dom::window()?.fetch_with_request(&request))
        .await
        .map_err(|e| ClientError::network(&e))?
        .dyn_into()
        .map_err(|e| ClientError::dom(&e))?;

    let text = JsFuture::from(response.text().map_err(|e| ClientError::dom(&e))?)
        .await
        .map_err(|e| ClientError::network(&e))?
        .as_string()
        .unwrap_or_default();

    if response.ok() {
        Ok(text)
    } else {
        Err(http_error(response.status(), &text))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Error for a non-2xx answer: the JSON `detail` when present, else the raw
/// body, else the bare status
pub fn http_error(status: u16, body: &str) -> ClientError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| match parsed.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });

    let message = match detail {
        Some(text) if !text.trim().is_empty() => text,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("HTTP {}", status),
    };
    ClientError::Http { status, message }
}
