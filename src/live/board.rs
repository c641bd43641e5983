//! Order Board
//!
//! DOM updates for order lists on staff and customer pages: payment badges,
//! status text and pay buttons, addressed by order id.

use crate::dom;
use crate::models::OrderId;

use super::events::BoardAction;

pub fn payment_badge_id(order_id: &OrderId) -> String {
    format!("pay-{}", order_id)
}

pub fn order_status_id(order_id: &OrderId) -> String {
    format!("order-status-{}", order_id)
}

pub fn pay_button_id(order_id: &OrderId) -> String {
    format!("btn-pay-{}", order_id)
}

/// Badge classes for a payment status
pub fn badge_class(payment_status: &str) -> &'static str {
    match payment_status {
        "paid" => "badge bg-success",
        "failed" | "expired" | "cancelled" => "badge bg-danger",
        _ => "badge bg-warning text-dark",
    }
}

pub fn apply(action: BoardAction) {
    match action {
        BoardAction::Reload => dom::reload(),
        BoardAction::SetPaymentBadge { order_id, status } => set_payment_badge(&order_id, &status),
        BoardAction::SetOrderStatus { order_id, status } => {
            dom::set_text(&order_status_id(&order_id), &status);
        }
        BoardAction::Ignore => {}
    }
}

pub fn set_payment_badge(order_id: &OrderId, status: &str) {
    if let Some(badge) = dom::by_id(&payment_badge_id(order_id)) {
        badge.set_text_content(Some(status));
        badge.set_class_name(badge_class(status));
    }
}
