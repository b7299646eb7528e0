use std::cell::RefCell;

use crate::error::{describe, ClientError, Result};

/// Durable home of the active session id.
pub trait SessionStore {
    fn load(&self) -> Option<String>;
    fn save(&self, session_id: &str) -> Result<()>;
}

/// `window.localStorage` under a fixed key.
#[derive(Clone, Debug)]
pub struct LocalSessionStore {
    key: String,
}

impl LocalSessionStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| ClientError::Storage("window not available".into()))?;
        window
            .local_storage()
            .map_err(|e| ClientError::Storage(describe(&e)))?
            .ok_or_else(|| ClientError::Storage("localStorage disabled".into()))
    }
}

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Option<String> {
        let storage = match self.storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("cannot read active session id: {}", e);
                return None;
            }
        };
        storage
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|id| !id.trim().is_empty())
    }

    fn save(&self, session_id: &str) -> Result<()> {
        self.storage()?
            .set_item(&self.key, session_id)
            .map_err(|e| ClientError::Storage(describe(&e)))
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_value(session_id: &str) -> Self {
        Self { value: RefCell::new(Some(session_id.to_string())) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone().filter(|id| !id.trim().is_empty())
    }

    fn save(&self, session_id: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(session_id.to_string());
        Ok(())
    }
}
