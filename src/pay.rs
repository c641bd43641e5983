//! Pay Page
//!
//! `pollPayment` for the customer pay page. The server re-checks the
//! provider and also broadcasts the result to the table socket; the
//! returned promise lets the page decide when to stop polling.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::commands;
use crate::config::ClientConfig;
use crate::live::board;
use crate::staff::payment::order_id_from_js;

/// Resolves to the payment status text; rejects with the error message
#[wasm_bindgen(js_name = pollPayment)]
pub fn poll_payment(order_id: JsValue) -> js_sys::Promise {
    let order_id = order_id_from_js(&order_id);
    let config = ClientConfig::load();
    future_to_promise(async move {
        match commands::poll_payment(&config, &order_id).await {
            Ok(poll) => {
                log::debug!("[PAY] order {} is {}", order_id, poll.payment_status);
                board::set_payment_badge(&order_id, &poll.payment_status);
                Ok(JsValue::from_str(&poll.payment_status))
            }
            Err(err) => {
                log::warn!("[PAY] poll for {} failed: {}", order_id, err);
                Err(err.into())
            }
        }
    })
}
