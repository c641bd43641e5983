//! Checkout State Store
//!
//! Uses Leptos reactive_stores for the rows shown on the checkout page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cart::lines;
use crate::models::CartLine;

/// Rows rendered by the checkout list and the sum shown beside it
#[derive(Clone, Debug, Default, Store)]
pub struct CheckoutState {
    /// Lines in cart order
    pub lines: Vec<CartLine>,
    /// Σ price × qty
    pub total: f64,
}

/// Type alias for the store
pub type CheckoutStore = Store<CheckoutState>;

/// Get the checkout store from context
pub fn use_checkout_store() -> CheckoutStore {
    expect_context::<CheckoutStore>()
}

/// Replace the rows after a cart change
pub fn store_replace_lines(store: &CheckoutStore, new_lines: &[CartLine]) {
    *store.lines().write() = new_lines.to_vec();
    *store.total().write() = lines::total(new_lines);
}
