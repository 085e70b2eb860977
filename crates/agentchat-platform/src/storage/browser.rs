//! `localStorage` storage backend.
//! The durable medium for the persisted session record; survives page
//! reloads and browser restarts.

use async_trait::async_trait;
use agentchat_core::ports::StoragePort;
use agentchat_types::{ClientError, Result};

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Fails when there is no window or `localStorage` is disabled
    /// (private-mode policies, non-browser contexts).
    pub fn new() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ClientError::Storage("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{e:?}")))?
            .ok_or_else(|| ClientError::Storage("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl StoragePort for BrowserStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
