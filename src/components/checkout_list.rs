//! Checkout List Component
//!
//! All cart rows; the whole list is rebuilt whenever the store's lines change.

use leptos::prelude::*;

use crate::components::CheckoutRow;
use crate::store::{use_checkout_store, CheckoutStateStoreFields};

#[component]
pub fn CheckoutList() -> impl IntoView {
    let store = use_checkout_store();

    view! {
        {move || {
            store
                .lines()
                .get()
                .into_iter()
                .map(|line| view! { <CheckoutRow line=line /> })
                .collect_view()
        }}
    }
}
