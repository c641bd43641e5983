//! Checkout Page
//!
//! Mounts the checkout list into `#cartList`, keeps the placeholder and sum
//! in step with the cart, and wires the place-order button.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlButtonElement;

use crate::cart::counters::format_money;
use crate::cart::{CartChange, CartSession};
use crate::commands::{self, SubmitOrderArgs};
use crate::components::CheckoutList;
use crate::config::ClientConfig;
use crate::context::CartContext;
use crate::dom;
use crate::error::{ClientError, ClientResult};
use crate::models::CartLine;
use crate::store::{store_replace_lines, CheckoutState, CheckoutStateStoreFields, CheckoutStore};

pub const EMPTY_ELEMENT_ID: &str = "cartEmpty";
pub const LIST_ELEMENT_ID: &str = "cartList";
pub const SUM_ELEMENT_ID: &str = "sumTotal";
pub const PLACE_ORDER_ELEMENT_ID: &str = "placeOrderBtn";
pub const ORDER_NOTE_ELEMENT_ID: &str = "orderNote";

/// Which of placeholder and list are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutLayout {
    pub show_empty: bool,
    pub show_list: bool,
}

impl CheckoutLayout {
    pub fn for_lines(lines: &[CartLine]) -> Self {
        let empty = lines.is_empty();
        Self {
            show_empty: empty,
            show_list: !empty,
        }
    }
}

/// Re-render after a cart change. Note edits skip the row rebuild so the
/// note input keeps focus; they never change the sum either.
pub fn render_checkout(store: &CheckoutStore, change: CartChange, cart_lines: &[CartLine]) {
    let layout = CheckoutLayout::for_lines(cart_lines);
    dom::set_visible(EMPTY_ELEMENT_ID, layout.show_empty);
    dom::set_visible(LIST_ELEMENT_ID, layout.show_list);

    if change.reshapes_list() {
        store_replace_lines(store, cart_lines);
    }
}

/// Mount the checkout view for `session`
pub fn mount(session: Rc<CartSession>, config: ClientConfig) -> ClientResult<()> {
    let list = dom::by_id_as::<web_sys::HtmlElement>(LIST_ELEMENT_ID)
        .ok_or_else(|| ClientError::Dom(format!("#{} missing", LIST_ELEMENT_ID)))?;

    let store = Store::new(CheckoutState::default());
    let ctx = CartContext::new(session.clone());

    session.subscribe(move |change, cart_lines| render_checkout(&store, change, cart_lines));

    leptos::mount::mount_to(list, move || {
        provide_context(ctx);
        provide_context(store);
        // `#sumTotal` sits outside the list
        Effect::new(move |_| {
            dom::set_text(SUM_ELEMENT_ID, &format_money(store.total().get()));
        });
        view! { <CheckoutList /> }
    })
    .forget();

    bind_place_order(session.clone(), config)?;
    session.refresh();
    Ok(())
}

/// Wire `#placeOrderBtn`, if the page has one
fn bind_place_order(session: Rc<CartSession>, config: ClientConfig) -> ClientResult<()> {
    let Some(button) = dom::by_id_as::<HtmlButtonElement>(PLACE_ORDER_ELEMENT_ID) else {
        return Ok(());
    };

    let target = button.clone();
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        ev.prevent_default();
        let session = session.clone();
        let config = config.clone();
        let button = target.clone();
        spawn_local(async move {
            place_order(&session, &config, &button).await;
        });
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| ClientError::dom(&e))?;
    on_click.forget();
    Ok(())
}

async fn place_order(session: &CartSession, config: &ClientConfig, button: &HtmlButtonElement) {
    let cart_lines = session.lines();
    if cart_lines.is_empty() {
        log::debug!("[CHECKOUT] nothing to submit");
        return;
    }

    let note = dom::field_value(ORDER_NOTE_ELEMENT_ID).unwrap_or_default();
    let args = SubmitOrderArgs::from_lines(&cart_lines, &note);

    button.set_disabled(true);
    match commands::submit_order(config, session.table_token(), &args).await {
        Ok(created) => {
            log::info!(
                "[CHECKOUT] order {} created (invoice {})",
                created.order_id,
                created.invoice_ref.as_deref().unwrap_or("-")
            );
            session.clear();
            let next = created.next_url().map(str::to_string);
            match next {
                Some(url) => {
                    if let Err(err) = dom::navigate(&url) {
                        log::warn!("[CHECKOUT] {}", err);
                        dom::reload();
                    }
                }
                None => dom::reload(),
            }
        }
        Err(err) => {
            log::warn!("[CHECKOUT] order submission failed: {}", err);
            button.set_disabled(false);
            dom::alert(&err.to_string());
        }
    }
}
