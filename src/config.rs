//! Client Configuration
//!
//! Endpoint paths and page identity. Pages may override the defaults with a
//! `<script type="application/json" id="qr-order-config">` block.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::dom;
use crate::models::{OrderId, OrderStatus};

/// Element holding the optional JSON overrides
pub const CONFIG_ELEMENT_ID: &str = "qr-order-config";

/// Characters escaped inside a single path segment or query value
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Endpoint configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// WebSocket path for staff live updates
    pub staff_socket_path: String,
    /// Payload sent once the staff socket opens
    pub handshake: String,
    /// `{table_token}` is substituted; customer pages join this group
    pub table_socket_path: String,
    /// `{order_id}` is substituted
    pub notify_payment_path: String,
    /// `{order_id}` is substituted; `?status=` is appended
    pub order_status_path: String,
    /// `{table_token}` is substituted
    pub submit_order_path: String,
    /// `{order_id}` is substituted
    pub poll_payment_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            staff_socket_path: "/ws/staff".to_string(),
            handshake: "hello".to_string(),
            table_socket_path: "/ws/table/{table_token}".to_string(),
            notify_payment_path: "/staff/orders/{order_id}/notify_payment".to_string(),
            order_status_path: "/staff/orders/{order_id}/status".to_string(),
            submit_order_path: "/api/t/{table_token}/orders".to_string(),
            poll_payment_path: "/api/orders/{order_id}/poll".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse overrides; malformed JSON falls back to the defaults
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("[CONFIG] ignoring malformed config: {}", err);
                Self::default()
            }
        }
    }

    /// Read the page's config block, if any
    pub fn load() -> Self {
        dom::by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Self::from_json(&raw))
            .unwrap_or_default()
    }

    pub fn notify_payment_url(&self, order_id: &OrderId) -> String {
        self.notify_payment_path
            .replace("{order_id}", &encode_segment(order_id.as_str()))
    }

    pub fn order_status_url(&self, order_id: &OrderId, status: OrderStatus) -> String {
        format!(
            "{}?status={}",
            self.order_status_path
                .replace("{order_id}", &encode_segment(order_id.as_str())),
            status.as_str()
        )
    }

    pub fn submit_order_url(&self, table_token: &str) -> String {
        self.submit_order_path
            .replace("{table_token}", &encode_segment(table_token))
    }

    pub fn poll_payment_url(&self, order_id: &OrderId) -> String {
        self.poll_payment_path
            .replace("{order_id}", &encode_segment(order_id.as_str()))
    }

    pub fn table_socket_url(&self, table_token: &str) -> String {
        self.table_socket_path
            .replace("{table_token}", &encode_segment(table_token))
    }
}

/// Percent-encode one path segment
pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Page identity taken from `<body>` data attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContext {
    /// `data-table-token`; customer pages only
    pub table_token: Option<String>,
    /// `data-customer-id`
    pub customer_id: Option<String>,
    /// `data-page="staff"`
    pub staff: bool,
}

impl PageContext {
    pub fn from_attributes(
        table_token: Option<String>,
        customer_id: Option<String>,
        page: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            table_token: non_empty(table_token),
            customer_id: non_empty(customer_id),
            staff: page.as_deref().map(str::trim) == Some("staff"),
        }
    }

    pub fn read() -> Self {
        match dom::body() {
            Some(body) => Self::from_attributes(
                body.get_attribute("data-table-token"),
                body.get_attribute("data-customer-id"),
                body.get_attribute("data-page"),
            ),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ClientConfig::default();
        assert_eq!(config.staff_socket_path, "/ws/staff");
        assert_eq!(
            config.notify_payment_url(&OrderId::new("42")),
            "/staff/orders/42/notify_payment"
        );
        assert_eq!(
            config.order_status_url(&OrderId::new("42"), OrderStatus::Cooking),
            "/staff/orders/42/status?status=cooking"
        );
        assert_eq!(
            config.poll_payment_url(&OrderId::new("42")),
            "/api/orders/42/poll"
        );
        assert_eq!(config.table_socket_url("T1"), "/ws/table/T1");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"staff_socket_path":"/ws/kitchen"}"#);
        assert_eq!(config.staff_socket_path, "/ws/kitchen");
        assert_eq!(config.handshake, "hello");
    }

    #[test]
    fn test_malformed_override_uses_defaults() {
        assert_eq!(ClientConfig::from_json("{not json"), ClientConfig::default());
    }

    #[test]
    fn test_table_token_is_percent_encoded() {
        let config = ClientConfig::default();
        assert_eq!(config.submit_order_url("T-01"), "/api/t/T-01/orders");
        assert_eq!(config.submit_order_url("a/b c"), "/api/t/a%2Fb%20c/orders");
    }

    #[test]
    fn test_page_context_from_attributes() {
        let page = PageContext::from_attributes(
            Some("tbl9".to_string()),
            Some("  ".to_string()),
            Some("menu".to_string()),
        );
        assert_eq!(page.table_token.as_deref(), Some("tbl9"));
        assert_eq!(page.customer_id, None);
        assert!(!page.staff);

        let staff = PageContext::from_attributes(None, None, Some("staff".to_string()));
        assert!(staff.staff);
        assert_eq!(staff.table_token, None);
    }
}
