//! Cart Counters
//!
//! Header badges showing item count and running total.

use crate::dom;
use crate::models::CartLine;

use super::lines;

pub const COUNT_ELEMENT_ID: &str = "cartCount";
pub const TOTAL_ELEMENT_ID: &str = "cartTotal";

/// Money as shown on every page: two decimals, no currency symbol
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Text written into the two counter elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterText {
    pub count: String,
    pub total: String,
}

impl CounterText {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            count: lines::count(lines).to_string(),
            total: format_money(lines::total(lines)),
        }
    }
}

/// Write count and total into the page; absent elements are skipped
pub fn sync_ui(lines: &[CartLine]) {
    let text = CounterText::from_lines(lines);
    dom::set_text(COUNT_ELEMENT_ID, &text.count);
    dom::set_text(TOTAL_ELEMENT_ID, &text.total);
}
