//! Cart Script API
//!
//! `Cart` class exported to page scripts. The instance created at boot is
//! published as `window.qrCart`; templates may also build their own with
//! `Cart.init(tableToken, customerId)`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::counters;
use super::session::CartSession;
use super::storage;
use crate::models::ItemId;

#[wasm_bindgen]
pub struct Cart {
    session: Rc<CartSession>,
}

#[wasm_bindgen]
impl Cart {
    /// Bind to the cart of one table/customer and refresh the counters
    pub fn init(table_token: String, customer_id: Option<String>) -> Cart {
        Self::open(&table_token, customer_id.as_deref())
    }

    pub fn add(&self, item_id: JsValue, name: String, price: JsValue) {
        let price = js_number(&price).unwrap_or(0.0);
        self.session.add(&ItemId::new(js_text(&item_id)), &name, price);
    }

    pub fn remove(&self, item_id: JsValue) {
        self.session.remove(&ItemId::new(js_text(&item_id)));
    }

    #[wasm_bindgen(js_name = setQty)]
    pub fn set_qty(&self, item_id: JsValue, qty: JsValue) {
        self.session.set_qty(&ItemId::new(js_text(&item_id)), &js_text(&qty));
    }

    #[wasm_bindgen(js_name = setNote)]
    pub fn set_note(&self, item_id: JsValue, note: String) {
        self.session.set_note(&ItemId::new(js_text(&item_id)), &note);
    }

    #[wasm_bindgen(js_name = getLines)]
    pub fn get_lines(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.lines()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn clear(&self) {
        self.session.clear();
    }

    /// Remove the carts of every customer at this table
    #[wasm_bindgen(js_name = resetTable)]
    pub fn reset_table(&self) -> Result<u32, JsValue> {
        let removed = self.session.reset_table()?;
        Ok(u32::try_from(removed).unwrap_or(u32::MAX))
    }

    pub fn total(&self) -> f64 {
        self.session.total()
    }

    pub fn count(&self) -> u32 {
        self.session.count()
    }

    #[wasm_bindgen(js_name = syncUI)]
    pub fn sync_ui(&self) {
        counters::sync_ui(&self.session.lines());
    }
}

impl Cart {
    /// Open the session over browser storage with counters subscribed
    pub fn open(table_token: &str, customer_id: Option<&str>) -> Self {
        let session = Rc::new(CartSession::new(
            table_token,
            customer_id,
            storage::open_default(),
        ));
        session.subscribe(|_, lines| counters::sync_ui(lines));
        session.refresh();
        log::info!("[CART] bound to {}", session.key().as_str());
        Self { session }
    }

    pub fn session(&self) -> Rc<CartSession> {
        self.session.clone()
    }
}

/// Text form of a JS string or number argument
fn js_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Some(n) => n.to_string(),
        None => String::new(),
    }
}

fn js_number(value: &JsValue) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()))
        .filter(|n| n.is_finite())
}
