//! Cart Session
//!
//! Explicit cart context for one table/customer pair. Every operation reads
//! the persisted lines, applies a pure transition, writes back and notifies
//! subscribers.

use std::cell::RefCell;

use super::lines;
use super::storage::KeyValueStore;
use crate::error::{ClientError, ClientResult};
use crate::models::{CartLine, ItemId};

/// Customer segment used when the page has no customer id
pub const ANONYMOUS: &str = "anon";

/// Storage key: `cart:<table_token>:<customer_id|anon>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartKey(String);

impl CartKey {
    pub fn new(table_token: &str, customer_id: Option<&str>) -> Self {
        let customer = customer_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(ANONYMOUS);
        Self(format!("cart:{}:{}", table_token, customer))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether `key` holds a cart of `table_token`, for any customer. The
/// underscore forms are written by older page scripts.
pub fn is_table_key(key: &str, table_token: &str) -> bool {
    ["cart:", "cart_"].iter().any(|prefix| {
        let sep = &prefix[4..];
        key.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(table_token))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(sep))
    })
}

/// Remove every cart stored for `table_token`; returns how many were removed
pub fn reset_table(store: &dyn KeyValueStore, table_token: &str) -> ClientResult<usize> {
    let doomed: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|key| is_table_key(key, table_token))
        .collect();
    for key in &doomed {
        store.remove(key)?;
    }
    Ok(doomed.len())
}

/// What a mutation changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// Explicit refresh (page load)
    Loaded,
    Added,
    Removed,
    Quantity,
    Note,
    Cleared,
}

impl CartChange {
    /// Note edits leave rows, subtotals and totals untouched
    pub fn reshapes_list(self) -> bool {
        !matches!(self, CartChange::Note)
    }
}

pub type CartListener = Box<dyn Fn(CartChange, &[CartLine])>;

/// One cart, bound to its storage key
pub struct CartSession {
    table_token: String,
    key: CartKey,
    store: Box<dyn KeyValueStore>,
    listeners: RefCell<Vec<CartListener>>,
}

impl CartSession {
    pub fn new(table_token: &str, customer_id: Option<&str>, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            table_token: table_token.to_string(),
            key: CartKey::new(table_token, customer_id),
            store,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &CartKey {
        &self.key
    }

    pub fn table_token(&self) -> &str {
        &self.table_token
    }

    /// Register a listener called after every mutation
    pub fn subscribe(&self, listener: impl Fn(CartChange, &[CartLine]) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Snapshot of the persisted lines; unreadable data is an empty cart
    pub fn lines(&self) -> Vec<CartLine> {
        let Some(raw) = self.store.get(self.key.as_str()) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(err) => {
                log::debug!("[CART] discarding unreadable cart {}: {}", self.key.as_str(), err);
                Vec::new()
            }
        }
    }

    pub fn add(&self, item_id: &ItemId, name: &str, price: f64) -> Vec<CartLine> {
        self.mutate(CartChange::Added, |lines| {
            lines::add_line(lines, item_id, name, price);
            true
        })
    }

    pub fn remove(&self, item_id: &ItemId) -> Vec<CartLine> {
        self.mutate(CartChange::Removed, |lines| lines::remove_line(lines, item_id))
    }

    /// `raw_qty` is user input; see [`lines::parse_qty`]
    pub fn set_qty(&self, item_id: &ItemId, raw_qty: &str) -> Vec<CartLine> {
        let qty = lines::parse_qty(raw_qty);
        self.mutate(CartChange::Quantity, |lines| lines::set_qty(lines, item_id, qty))
    }

    pub fn set_note(&self, item_id: &ItemId, note: &str) -> Vec<CartLine> {
        self.mutate(CartChange::Note, |lines| lines::set_note(lines, item_id, note))
    }

    pub fn clear(&self) {
        if let Err(err) = self.store.remove(self.key.as_str()) {
            log::warn!("[CART] clear failed: {}", err);
        }
        self.notify(CartChange::Cleared, &[]);
    }

    /// Clear the carts of every customer at this table
    pub fn reset_table(&self) -> ClientResult<usize> {
        let removed = reset_table(self.store.as_ref(), &self.table_token)?;
        log::info!("[CART] reset table {}: {} cart(s) removed", self.table_token, removed);
        self.notify(CartChange::Cleared, &[]);
        Ok(removed)
    }

    pub fn total(&self) -> f64 {
        lines::total(&self.lines())
    }

    pub fn count(&self) -> u32 {
        lines::count(&self.lines())
    }

    /// Notify listeners with the current lines
    pub fn refresh(&self) {
        let lines = self.lines();
        self.notify(CartChange::Loaded, &lines);
    }

    fn mutate(&self, change: CartChange, apply: impl FnOnce(&mut Vec<CartLine>) -> bool) -> Vec<CartLine> {
        let mut lines = self.lines();
        if apply(&mut lines) {
            self.persist(&lines);
            self.notify(change, &lines);
        }
        lines
    }

    fn persist(&self, lines: &[CartLine]) {
        let result = serde_json::to_string(lines)
            .map_err(ClientError::from)
            .and_then(|raw| self.store.set(self.key.as_str(), &raw));
        if let Err(err) = result {
            log::warn!("[CART] could not save {}: {}", self.key.as_str(), err);
        }
    }

    fn notify(&self, change: CartChange, lines: &[CartLine]) {
        for listener in self.listeners.borrow().iter() {
            listener(change, lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::storage::MemoryStore;
    use std::rc::Rc;

    fn session() -> CartSession {
        CartSession::new("T1", None, Box::new(MemoryStore::new()))
    }

    fn id(s: &str) -> ItemId {
        ItemId::new(s)
    }

    /// Lets several sessions share one backing map
    struct Shared(Rc<MemoryStore>);

    impl KeyValueStore for Shared {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> ClientResult<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> ClientResult<()> {
            self.0.remove(key)
        }
        fn keys(&self) -> Vec<String> {
            self.0.keys()
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(CartKey::new("T1", None).as_str(), "cart:T1:anon");
        assert_eq!(CartKey::new("T1", Some("")).as_str(), "cart:T1:anon");
        assert_eq!(CartKey::new("T1", Some("c42")).as_str(), "cart:T1:c42");
    }

    #[test]
    fn test_pad_thai_example() {
        let cart = session();
        cart.add(&id("A"), "Pad Thai", 60.0);
        cart.add(&id("A"), "Pad Thai", 60.0);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 2);
        assert_eq!(cart.total(), 120.0);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_set_qty_invalid_input_becomes_one() {
        let cart = session();
        cart.add(&id("A"), "Pad Thai", 60.0);
        cart.set_qty(&id("A"), "5");
        assert_eq!(cart.lines()[0].qty, 5);

        cart.set_qty(&id("A"), "abc");
        assert_eq!(cart.lines()[0].qty, 1);
    }

    #[test]
    fn test_clear_empties_cart() {
        let cart = session();
        cart.add(&id("A"), "Pad Thai", 60.0);
        cart.add(&id("B"), "Som Tam", 45.0);
        cart.clear();

        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_malformed_storage_reads_as_empty() {
        let store = MemoryStore::new();
        store.set("cart:T1:anon", "definitely not json").unwrap();
        let cart = CartSession::new("T1", None, Box::new(store));

        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(), 0.0);

        // The next mutation overwrites the bad value
        cart.add(&id("A"), "Pad Thai", 60.0);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_carts_are_isolated_by_customer() {
        let store = Rc::new(MemoryStore::new());
        let alice = CartSession::new("T1", Some("alice"), Box::new(Shared(store.clone())));
        let anon = CartSession::new("T1", None, Box::new(Shared(store.clone())));
        alice.add(&id("A"), "Pad Thai", 60.0);

        assert_eq!(alice.count(), 1);
        assert_eq!(anon.count(), 0);
        assert!(store.get("cart:T1:alice").is_some());
    }

    #[test]
    fn test_listeners_see_changes() {
        let cart = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        cart.subscribe(move |change, lines| sink.borrow_mut().push((change, lines.len())));

        cart.add(&id("A"), "Pad Thai", 60.0);
        cart.set_note(&id("A"), "spicy");
        cart.set_qty(&id("Z"), "3");
        cart.remove(&id("A"));
        cart.clear();

        assert_eq!(
            *seen.borrow(),
            vec![
                (CartChange::Added, 1),
                (CartChange::Note, 1),
                (CartChange::Removed, 0),
                (CartChange::Cleared, 0),
            ]
        );
    }

    #[test]
    fn test_note_change_does_not_reshape() {
        assert!(!CartChange::Note.reshapes_list());
        assert!(CartChange::Quantity.reshapes_list());
        assert!(CartChange::Removed.reshapes_list());
    }

    #[test]
    fn test_lines_is_a_snapshot() {
        let cart = session();
        cart.add(&id("A"), "Pad Thai", 60.0);
        let mut snapshot = cart.lines();
        snapshot[0].qty = 50;

        assert_eq!(cart.lines()[0].qty, 1);
    }

    #[test]
    fn test_is_table_key() {
        assert!(is_table_key("cart:T1", "T1"));
        assert!(is_table_key("cart:T1:anon", "T1"));
        assert!(is_table_key("cart:T1:c42", "T1"));
        assert!(is_table_key("cart_T1", "T1"));
        assert!(is_table_key("cart_T1_c42", "T1"));

        assert!(!is_table_key("cart:T10:anon", "T1"));
        assert!(!is_table_key("cart:T2:anon", "T1"));
        assert!(!is_table_key("cart_T1:x", "T1"));
        assert!(!is_table_key("theme", "T1"));
    }

    #[test]
    fn test_reset_table_clears_every_customer() {
        let store = Rc::new(MemoryStore::new());
        let old_id = CartSession::new("T1", Some("c41"), Box::new(Shared(store.clone())));
        let current = CartSession::new("T1", Some("c42"), Box::new(Shared(store.clone())));
        let anon = CartSession::new("T1", None, Box::new(Shared(store.clone())));
        let other_table = CartSession::new("T10", None, Box::new(Shared(store.clone())));
        old_id.add(&id("A"), "Pad Thai", 60.0);
        current.add(&id("B"), "Som Tam", 45.0);
        anon.add(&id("C"), "Khao Pad", 50.0);
        other_table.add(&id("A"), "Pad Thai", 60.0);
        store.set("cart_T1_legacy", "[]").unwrap();
        store.set("theme", "dark").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        current.subscribe(move |change, lines| sink.borrow_mut().push((change, lines.len())));

        assert_eq!(current.reset_table().unwrap(), 4);
        assert_eq!(old_id.count(), 0);
        assert_eq!(current.count(), 0);
        assert_eq!(anon.count(), 0);
        assert_eq!(other_table.count(), 1);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(*seen.borrow(), vec![(CartChange::Cleared, 0)]);
    }
}
