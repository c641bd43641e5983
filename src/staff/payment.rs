//! Staff Actions
//!
//! Button handlers exported to the staff page: payment confirmation and
//! order status changes.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlButtonElement;

use crate::live::board;
use crate::commands;
use crate::config::ClientConfig;
use crate::dom;
use crate::models::{OrderId, OrderStatus};

/// Label of a pay button once the payment is recorded
pub const PAID_LABEL: &str = "Paid";

pub(crate) fn order_id_from_js(value: &JsValue) -> OrderId {
    match (value.as_string(), value.as_f64()) {
        (Some(text), _) => OrderId::new(text),
        (None, Some(n)) if n.fract() == 0.0 => OrderId::new(format!("{}", n as i64)),
        (None, Some(n)) => OrderId::new(n.to_string()),
        (None, None) => OrderId::new(""),
    }
}

/// Confirm, then tell the server the payment for `order_id` was received
#[wasm_bindgen(js_name = confirmPayment)]
pub fn confirm_payment(order_id: JsValue) {
    let order_id = order_id_from_js(&order_id);
    if !dom::confirm(&format!("Confirm payment received for order #{}?", order_id)) {
        return;
    }

    let button = dom::by_id_as::<HtmlButtonElement>(&board::pay_button_id(&order_id));
    if let Some(btn) = &button {
        btn.set_disabled(true);
    }

    let config = ClientConfig::load();
    spawn_local(async move {
        match commands::notify_payment(&config, &order_id).await {
            Ok(ack) => {
                log::info!("[STAFF] order {} payment {}", order_id, ack.payment_status);
                board::set_payment_badge(&order_id, &ack.payment_status);
                if let Some(btn) = &button {
                    btn.set_text_content(Some(PAID_LABEL));
                    btn.set_disabled(true);
                }
            }
            Err(err) => {
                log::warn!("[STAFF] confirm payment for {} failed: {}", order_id, err);
                if let Some(btn) = &button {
                    btn.set_disabled(false);
                }
                dom::alert(&err.to_string());
            }
        }
    });
}

/// Move an order to `status` (`new`, `cooking`, `served`, `cancelled`)
#[wasm_bindgen(js_name = setOrderStatus)]
pub fn set_order_status(order_id: JsValue, status: String) {
    let order_id = order_id_from_js(&order_id);
    let Some(status) = OrderStatus::parse(&status) else {
        dom::alert(&format!("Unknown order status: {}", status));
        return;
    };

    let config = ClientConfig::load();
    spawn_local(async move {
        match commands::update_order_status(&config, &order_id, status).await {
            Ok(ack) => {
                dom::set_text(&board::order_status_id(&order_id), ack.order_status.as_str());
            }
            Err(err) => {
                log::warn!("[STAFF] status update for {} failed: {}", order_id, err);
                dom::alert(&err.to_string());
            }
        }
    });
}
