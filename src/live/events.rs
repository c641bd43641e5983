//! Live Events
//!
//! Messages pushed over the staff and table sockets and the board action each
//! implies.

use serde::Deserialize;

use crate::models::OrderId;

/// Inbound socket message, dispatched on its `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    NewOrder {
        #[serde(default)]
        order_id: Option<OrderId>,
    },
    OrderCreated {
        #[serde(default)]
        order_id: Option<OrderId>,
    },
    PaymentUpdate {
        order_id: OrderId,
        #[serde(default)]
        payment_status: Option<String>,
    },
    OrderStatus {
        order_id: OrderId,
        #[serde(default)]
        order_status: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// What the staff board does in response
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    /// New orders change the list layout; the server re-renders it
    Reload,
    SetPaymentBadge { order_id: OrderId, status: String },
    SetOrderStatus { order_id: OrderId, status: String },
    Ignore,
}

impl LiveEvent {
    /// `None` for anything that is not a well-formed event
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn action(self) -> BoardAction {
        match self {
            LiveEvent::NewOrder { .. } | LiveEvent::OrderCreated { .. } => BoardAction::Reload,
            LiveEvent::PaymentUpdate {
                order_id,
                payment_status: Some(status),
            } => BoardAction::SetPaymentBadge { order_id, status },
            LiveEvent::OrderStatus {
                order_id,
                order_status: Some(status),
            } => BoardAction::SetOrderStatus { order_id, status },
            _ => BoardAction::Ignore,
        }
    }
}

/// Parse and map in one step; malformed input is ignored
pub fn action_for(raw: &str) -> BoardAction {
    LiveEvent::parse(raw)
        .map(LiveEvent::action)
        .unwrap_or(BoardAction::Ignore)
}
