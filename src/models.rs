//! Frontend Models
//!
//! Data structures persisted in local storage or exchanged with the server.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ids arrive as JSON strings or numbers depending on the template that
/// produced them; both normalize to the same text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

/// Menu item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-side order identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product entry in the cart (storage format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Unit price; unreadable values count as zero
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_qty")]
    pub qty: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub note: String,
}

impl CartLine {
    pub fn new(item_id: ItemId, name: impl Into<String>, price: f64) -> Self {
        Self {
            item_id,
            name: name.into(),
            price,
            qty: 1,
            note: String::new(),
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// Staff-selectable order states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Cooking,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "new" => Some(OrderStatus::New),
            "cooking" => Some(OrderStatus::Cooking),
            "served" => Some(OrderStatus::Served),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_of(&value).filter(|n| n.is_finite()).unwrap_or(0.0))
}

fn lenient_qty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_of(&value)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.min(f64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_item_id_normalizes_to_text() {
        let line: CartLine =
            serde_json::from_str(r#"{"item_id":7,"name":"Tom Yum","price":80,"qty":2,"note":""}"#)
                .unwrap();
        assert_eq!(line.item_id, ItemId::new("7"));
        assert_eq!(line.subtotal(), 160.0);
    }

    #[test]
    fn test_missing_fields_read_as_zero_or_empty() {
        let line: CartLine = serde_json::from_str(r#"{"item_id":"A","price":"abc"}"#).unwrap();
        assert_eq!(line.name, "");
        assert_eq!(line.price, 0.0);
        assert_eq!(line.qty, 0);
        assert_eq!(line.note, "");
    }

    #[test]
    fn test_string_numbers_are_accepted() {
        let line: CartLine =
            serde_json::from_str(r#"{"item_id":"A","price":"12.5","qty":"3","note":null}"#).unwrap();
        assert_eq!(line.price, 12.5);
        assert_eq!(line.qty, 3);
        assert_eq!(line.note, "");
    }

    #[test]
    fn test_storage_field_names() {
        let line = CartLine::new(ItemId::new("A"), "Pad Thai", 60.0);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["item_id"], "A");
        assert_eq!(json["name"], "Pad Thai");
        assert_eq!(json["price"], 60.0);
        assert_eq!(json["qty"], 1);
        assert_eq!(json["note"], "");
    }

    #[test]
    fn test_order_status_parse() {
        assert_eq!(OrderStatus::parse("cooking"), Some(OrderStatus::Cooking));
        assert_eq!(OrderStatus::parse(" served "), Some(OrderStatus::Served));
        assert_eq!(OrderStatus::parse("eaten"), None);
        assert_eq!(OrderStatus::Cancelled.as_str(), "cancelled");
    }
}
