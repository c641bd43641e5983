//! Cart Storage
//!
//! Key-value persistence behind a trait so the cart can run against
//! `localStorage` in the browser and an in-memory map elsewhere.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::dom;
use crate::error::{ClientError, ClientResult};

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    fn remove(&self, key: &str) -> ClientResult<()>;

    /// Every key currently stored
    fn keys(&self) -> Vec<String>;
}

/// `window.localStorage`
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// Fails when storage is disabled (e.g. some private browsing modes)
    pub fn open() -> ClientResult<Self> {
        let storage = dom::window()?
            .local_storage()
            .map_err(|e| ClientError::dom(&e))?
            .ok_or_else(|| ClientError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(crate::error::describe_js(&e)))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| ClientError::Storage(crate::error::describe_js(&e)))
    }

    fn keys(&self) -> Vec<String> {
        let len = self.storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| self.storage.key(i).ok().flatten())
            .collect()
    }
}

/// Process-local map; used when `localStorage` is unavailable and in tests
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

/// Browser storage when available, memory otherwise
pub fn open_default() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("[CART] {}; cart will not survive a reload", err);
            Box::new(MemoryStore::new())
        }
    }
}
