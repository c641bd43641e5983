//! Connection State
//!
//! Lifecycle of a live-update socket. `Closed` is terminal: the reconnect policy
//! is `Never`, so a dropped connection stays dropped until the page reloads.

/// Socket lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn on_open(self) -> Self {
        match self {
            ConnectionState::Connecting => ConnectionState::Open,
            other => other,
        }
    }

    pub fn on_close(self) -> Self {
        ConnectionState::Closed
    }

    /// An error is always followed by a close; the state only moves then
    pub fn on_error(self) -> Self {
        self
    }

    pub fn accepts_messages(self) -> bool {
        self == ConnectionState::Open
    }
}

/// What happens after `Closed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconnectPolicy {
    /// No reconnection; the page must be reloaded
    #[default]
    Never,
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt`, if any
    pub fn next_delay_ms(self, _attempt: u32) -> Option<u32> {
        match self {
            ReconnectPolicy::Never => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_then_close() {
        let state = ConnectionState::default();
        assert!(!state.accepts_messages());

        let state = state.on_open();
        assert_eq!(state, ConnectionState::Open);
        assert!(state.accepts_messages());

        let state = state.on_error().on_close();
        assert_eq!(state, ConnectionState::Closed);
    }

    #[test]
    fn test_closed_is_terminal() {
        let state = ConnectionState::Connecting.on_close();
        assert_eq!(state.on_open(), ConnectionState::Closed);
        assert!(!state.on_open().accepts_messages());
    }

    #[test]
    fn test_no_reconnect() {
        assert_eq!(ReconnectPolicy::default().next_delay_ms(0), None);
        assert_eq!(ReconnectPolicy::Never.next_delay_ms(5), None);
    }
}
