//! Live Socket
//!
//! One WebSocket per page: the staff dashboard listens on the staff group,
//! customer pages on their table's group. Messages are dispatched to the
//! board; close and error only produce a log line.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::board;
use super::connection::{ConnectionState, ReconnectPolicy};
use super::events;
use crate::config::ClientConfig;
use crate::dom;
use crate::error::{ClientError, ClientResult};

/// Which server group a socket joins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Log tag
    pub label: &'static str,
    /// Same-origin path, already substituted
    pub path: String,
    /// Sent once after open
    pub handshake: Option<String>,
}

impl Channel {
    pub fn staff(config: &ClientConfig) -> Self {
        Self {
            label: "STAFF",
            path: config.staff_socket_path.clone(),
            handshake: Some(config.handshake.clone()).filter(|h| !h.is_empty()),
        }
    }

    /// The table group receives payment and status updates for its orders
    pub fn table(config: &ClientConfig, table_token: &str) -> Self {
        Self {
            label: "TABLE",
            path: config.table_socket_url(table_token),
            handshake: None,
        }
    }
}

/// `ws(s)://host/path` for the page's own origin
pub fn socket_url(page_protocol: &str, host: &str, path: &str) -> String {
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    format!("{}://{}{}", scheme, host, path)
}

/// Open a socket on `channel` and wire its handlers
pub fn connect(channel: Channel) -> ClientResult<()> {
    let location = dom::window()?.location();
    let protocol = location.protocol().map_err(|e| ClientError::dom(&e))?;
    let host = location.host().map_err(|e| ClientError::dom(&e))?;
    let url = socket_url(&protocol, &host, &channel.path);

    let socket = WebSocket::new(&url).map_err(|e| ClientError::dom(&e))?;
    let state = Rc::new(Cell::new(ConnectionState::Connecting));
    let label = channel.label;
    log::info!("[{}] connecting to {}", label, url);

    let on_open = {
        let socket = socket.clone();
        let state = state.clone();
        let handshake = channel.handshake;
        Closure::<dyn FnMut(Event)>::new(move |_ev: Event| {
            state.set(state.get().on_open());
            log::info!("[{}] socket open", label);
            if let Some(handshake) = &handshake {
                // Best-effort
                let _ = socket.send_with_str(handshake);
            }
        })
    };
    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    on_open.forget();

    let on_message = {
        let state = state.clone();
        Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
            if !state.get().accepts_messages() {
                return;
            }
            if let Some(raw) = ev.data().as_string() {
                board::apply(events::action_for(&raw));
            }
        })
    };
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    on_message.forget();

    let on_error = {
        let state = state.clone();
        Closure::<dyn FnMut(Event)>::new(move |_ev: Event| {
            state.set(state.get().on_error());
            log::warn!("[{}] socket error", label);
        })
    };
    socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    let on_close = {
        let state = state.clone();
        Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
            state.set(state.get().on_close());
            log::warn!(
                "[{}] socket closed (code {}, reason {:?}); reconnect: {:?}",
                label,
                ev.code(),
                ev.reason(),
                ReconnectPolicy::default().next_delay_ms(0)
            );
        })
    };
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();

    Ok(())
}
