//! Menu Page Bindings
//!
//! Buttons marked `data-add-item` add one unit of their item to the cart:
//!
//! ```html
//! <button data-add-item data-item-id="12" data-item-name="Pad Thai" data-item-price="60">
//! ```

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::cart::CartSession;
use crate::dom;
use crate::error::{ClientError, ClientResult};
use crate::models::ItemId;

pub const ADD_SELECTOR: &str = "[data-add-item]";

/// Item carried by an add button
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub item_id: ItemId,
    pub name: String,
    pub price: f64,
}

impl MenuEntry {
    /// `None` without an item id; an unreadable price counts as zero
    pub fn from_attributes(id: Option<String>, name: Option<String>, price: Option<String>) -> Option<Self> {
        let id = id.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())?;
        Some(Self {
            item_id: ItemId::new(id),
            name: name.unwrap_or_default(),
            price: price
                .and_then(|p| p.trim().parse::<f64>().ok())
                .filter(|p| p.is_finite())
                .unwrap_or(0.0),
        })
    }

    fn from_element(el: &Element) -> Option<Self> {
        Self::from_attributes(
            el.get_attribute("data-item-id"),
            el.get_attribute("data-item-name"),
            el.get_attribute("data-item-price"),
        )
    }
}

/// Attach click handlers to every add button on the page
pub fn bind_add_buttons(session: Rc<CartSession>) -> ClientResult<usize> {
    let nodes = dom::document()?
        .query_selector_all(ADD_SELECTOR)
        .map_err(|e| ClientError::dom(&e))?;

    let mut bound = 0;
    for index in 0..nodes.length() {
        let Some(el) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };

        let session = session.clone();
        let target = el.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            // Read at click time so templates can update attributes
            match MenuEntry::from_element(&target) {
                Some(entry) => {
                    session.add(&entry.item_id, &entry.name, entry.price);
                }
                None => log::warn!("[MENU] add button without data-item-id"),
            }
        });
        el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(|e| ClientError::dom(&e))?;
        on_click.forget();
        bound += 1;
    }
    Ok(bound)
}
