//! Staff Dashboard
//!
//! Button actions for the staff order list.

pub mod payment;
