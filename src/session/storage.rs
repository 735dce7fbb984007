//! Synchronous key/value backends for the token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `BrowserStore` wraps `window.localStorage` so a session survives page
//! reloads. `MemoryStore` backs server rendering and tests. Both are
//! single-threaded; nothing here is `Send`.

use std::cell::RefCell;
use std::collections::HashMap;

/// Minimal storage surface the token store needs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a description when the backend refuses the write (quota,
    /// privacy mode, missing window).
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    fn remove(&self, key: &str);
}

/// In-process store; contents vanish with the page.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage`, looked up on every call.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = Self::storage().ok_or_else(|| "localStorage unavailable".to_owned())?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("localStorage write failed: {e:?}"))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
