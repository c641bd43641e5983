//! UI Components
//!
//! Leptos components mounted into server-rendered pages.

mod checkout_list;
mod checkout_row;

pub use checkout_list::CheckoutList;
pub use checkout_row::CheckoutRow;
