//! Order Commands
//!
//! Customer order submission and payment polling.

use serde::{Deserialize, Serialize};

use super::post;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{CartLine, ItemId, OrderId};

/// One cart line as the order API expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineArgs {
    pub menu_item_id: ItemId,
    pub qty: u32,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOrderArgs {
    pub cart: Vec<OrderLineArgs>,
    pub note: String,
}

impl SubmitOrderArgs {
    pub fn from_lines(lines: &[CartLine], note: &str) -> Self {
        Self {
            cart: lines
                .iter()
                .map(|line| OrderLineArgs {
                    menu_item_id: line.item_id.clone(),
                    qty: line.qty.max(1),
                    note: line.note.trim().to_string(),
                })
                .collect(),
            note: note.trim().to_string(),
        }
    }
}

/// Server answer to a created order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    #[serde(default)]
    pub invoice_ref: Option<String>,
    #[serde(default)]
    pub pay_url: Option<String>,
    #[serde(default)]
    pub status_url: Option<String>,
}

impl OrderCreated {
    /// Where the customer goes next
    pub fn next_url(&self) -> Option<&str> {
        self.pay_url.as_deref().or(self.status_url.as_deref())
    }
}

pub async fn submit_order(
    config: &ClientConfig,
    table_token: &str,
    args: &SubmitOrderArgs,
) -> ClientResult<OrderCreated> {
    if args.cart.is_empty() {
        return Err(ClientError::InvalidInput("Cart is empty".to_string()));
    }
    let body = serde_json::to_string(args)?;
    let text = post(&config.submit_order_url(table_token), Some(body)).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Payment state reported by a poll
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentPoll {
    pub payment_status: String,
}

impl PaymentPoll {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// Ask the server to re-check the payment provider for `order_id`
pub async fn poll_payment(config: &ClientConfig, order_id: &OrderId) -> ClientResult<PaymentPoll> {
    let text = post(&config.poll_payment_url(order_id), None).await?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args_from_lines() {
        let mut line = CartLine::new(ItemId::new("12"), "Pad Thai", 60.0);
        line.qty = 2;
        line.note = "  no peanuts ".to_string();

        let args = SubmitOrderArgs::from_lines(&[line], " table by the window ");
        let json = serde_json::to_value(&args).unwrap();

        assert_eq!(json["cart"][0]["menu_item_id"], "12");
        assert_eq!(json["cart"][0]["qty"], 2);
        assert_eq!(json["cart"][0]["note"], "no peanuts");
        assert_eq!(json["note"], "table by the window");
        // Name and price are looked up server-side
        assert!(json["cart"][0].get("price").is_none());
    }

    #[test]
    fn test_order_created_next_url() {
        let created: OrderCreated = serde_json::from_str(
            r#"{"ok":true,"order_id":31,"invoice_ref":"INV1","pay_url":"/t/T1/pay/31","status_url":"/t/T1/status"}"#,
        )
        .unwrap();
        assert_eq!(created.order_id, OrderId::new("31"));
        assert_eq!(created.invoice_ref.as_deref(), Some("INV1"));
        assert_eq!(created.next_url(), Some("/t/T1/pay/31"));

        let no_pay: OrderCreated =
            serde_json::from_str(r#"{"order_id":"31","status_url":"/t/T1/status"}"#).unwrap();
        assert_eq!(no_pay.next_url(), Some("/t/T1/status"));
    }

    #[test]
    fn test_payment_poll_parsing() {
        let poll: PaymentPoll =
            serde_json::from_str(r#"{"ok":true,"payment_status":"pending"}"#).unwrap();
        assert_eq!(poll.payment_status, "pending");
        assert!(!poll.is_paid());

        let paid: PaymentPoll = serde_json::from_str(r#"{"payment_status":"paid"}"#).unwrap();
        assert!(paid.is_paid());

        // Without a status there is nothing to show
        assert!(serde_json::from_str::<PaymentPoll>(r#"{"ok":true}"#).is_err());
    }
}
