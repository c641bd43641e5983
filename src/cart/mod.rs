//! Cart
//!
//! Per-table shopping cart persisted in browser storage.

pub mod api;
pub mod counters;
pub mod lines;
pub mod session;
pub mod storage;

pub use api::Cart;
pub use session::{CartChange, CartSession};
