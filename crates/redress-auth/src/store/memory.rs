//! In-memory session store for tests and no-persist runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use redress_core::result::AppResult;
use redress_core::traits::store::SessionStore;

/// Ephemeral session store backed by a mutex-guarded map.
///
/// `clear_all` holds the same lock as every read, so a concurrent `get`
/// observes either the full map or the empty one, never a partial clear.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.entries.lock().await.clear();
        Ok(())
    }
}
