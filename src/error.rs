//! Client Errors
//!
//! Error type shared by the cart, checkout and staff modules.

use wasm_bindgen::{JsCast, JsValue};

/// Common result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-level errors
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response
    Network(String),
    /// The server answered with a non-2xx status
    Http { status: u16, message: String },
    /// A required browser API or element is missing
    Dom(String),
    /// Browser storage rejected a write
    Storage(String),
    Serialization(String),
    InvalidInput(String),
}

impl ClientError {
    /// Wrap a JavaScript exception as a DOM error
    pub fn dom(value: &JsValue) -> Self {
        ClientError::Dom(describe_js(value))
    }

    /// Wrap a rejected fetch promise
    pub fn network(value: &JsValue) -> Self {
        ClientError::Network(describe_js(value))
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Server messages are shown to staff as-is
            ClientError::Http { message, .. } => write!(f, "{}", message),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Dom(msg) => write!(f, "Page error: {}", msg),
            ClientError::Storage(msg) => write!(f, "Storage error: {}", msg),
            ClientError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ClientError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort text for a thrown JavaScript value
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_displays_server_message() {
        let err = ClientError::Http {
            status: 400,
            message: "Order has no payment record".to_string(),
        };
        assert_eq!(err.to_string(), "Order has no payment record");
    }

    #[test]
    fn test_serde_error_conversion() {
        let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
