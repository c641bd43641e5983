//! Page Boot
//!
//! Reads the page identity from `<body>` and starts what the page needs:
//! the cart and table socket (customer pages), the checkout view (when
//! `#cartList` exists) and the staff socket (staff pages).

use wasm_bindgen::prelude::*;

use crate::cart::Cart;
use crate::checkout;
use crate::config::{ClientConfig, PageContext};
use crate::dom;
use crate::error::{ClientError, ClientResult};
use crate::live;
use crate::menu;

/// Global name under which the page's cart is published
pub const CART_GLOBAL: &str = "qrCart";

pub fn boot() -> ClientResult<()> {
    let config = ClientConfig::load();
    let page = PageContext::read();

    if let Some(table_token) = page.table_token.as_deref() {
        let cart = Cart::open(table_token, page.customer_id.as_deref());
        let session = cart.session();

        let bound = menu::bind_add_buttons(session.clone())?;
        if bound > 0 {
            log::debug!("[APP] bound {} add buttons", bound);
        }

        if dom::by_id(checkout::LIST_ELEMENT_ID).is_some() {
            checkout::mount(session, config.clone())?;
        }

        publish_cart(cart)?;

        // Live updates are optional on customer pages
        if let Err(err) = live::start_table(&config, table_token) {
            log::warn!("[APP] table updates unavailable: {}", err);
        }
    }

    if page.staff {
        live::start_staff(&config)?;
    }

    Ok(())
}

fn publish_cart(cart: Cart) -> ClientResult<()> {
    let window = dom::window()?;
    js_sys::Reflect::set(&window, &JsValue::from_str(CART_GLOBAL), &JsValue::from(cart))
        .map_err(|e| ClientError::dom(&e))?;
    Ok(())
}

/// Recent log lines, for pasting into bug reports
#[wasm_bindgen(js_name = recentLogs)]
pub fn recent_logs() -> js_sys::Array {
    console_logger::recent()
        .into_iter()
        .map(|line| JsValue::from_str(&line))
        .collect()
}
