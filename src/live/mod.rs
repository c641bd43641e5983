//! Live Updates
//!
//! Socket listeners shared by the staff dashboard and customer pages, and
//! the order board they update.

pub mod board;
pub mod connection;
pub mod events;
pub mod socket;

use crate::config::ClientConfig;
use crate::error::ClientResult;

pub use socket::Channel;

/// Listen on the staff group
pub fn start_staff(config: &ClientConfig) -> ClientResult<()> {
    socket::connect(Channel::staff(config))
}

/// Listen on one table's group
pub fn start_table(config: &ClientConfig, table_token: &str) -> ClientResult<()> {
    socket::connect(Channel::table(config, table_token))
}
