//! Checkout Row Component
//!
//! One cart line with quantity, note and delete controls. Text is rendered
//! through text nodes and `prop:value`, so names and notes are never parsed
//! as markup.

use leptos::prelude::*;

use crate::cart::counters::format_money;
use crate::cart::lines::NOTE_MAX_CHARS;
use crate::context::use_cart_context;
use crate::models::CartLine;

#[component]
pub fn CheckoutRow(line: CartLine) -> impl IntoView {
    let ctx = use_cart_context();
    let subtotal = format_money(line.subtotal());
    let price = format_money(line.price);

    // Applied on every keystroke and again on blur, so a value typed just
    // before navigating away is not lost
    let qty_id = line.item_id.clone();
    let apply_qty = move |raw: String| {
        ctx.with_session(|session| session.set_qty(&qty_id, &raw));
    };
    let apply_qty_on_blur = apply_qty.clone();

    let note_id = line.item_id.clone();
    let delete_id = line.item_id.clone();

    view! {
        <div class="cart-row" data-item-id=line.item_id.to_string()>
            <div class="cart-row-main">
                <div class="cart-name">{line.name.clone()}</div>
                <div class="cart-price">{price}</div>
            </div>
            <div class="cart-row-controls">
                <input
                    type="number"
                    class="cart-qty"
                    min="1"
                    prop:value=line.qty.to_string()
                    on:input=move |ev| apply_qty(event_target_value(&ev))
                    on:blur=move |ev| apply_qty_on_blur(event_target_value(&ev))
                />
                <div class="cart-subtotal">{subtotal}</div>
                <button
                    type="button"
                    class="cart-delete"
                    on:click=move |_| {
                        ctx.with_session(|session| session.remove(&delete_id));
                    }
                >
                    "×"
                </button>
            </div>
            <input
                type="text"
                class="cart-note"
                placeholder="Note"
                maxlength=NOTE_MAX_CHARS.to_string()
                prop:value=line.note.clone()
                on:input=move |ev| {
                    let note = event_target_value(&ev);
                    ctx.with_session(|session| session.set_note(&note_id, &note));
                }
            />
        </div>
    }
}
