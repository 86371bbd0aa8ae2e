//! Persistent session store trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable client-side key/value store for session credentials.
///
/// Values are opaque strings; callers own encoding and decoding. Keys are
/// namespaced to the auth module (see the store's `keys` module) and never
/// collide with unrelated persisted data.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Get a value by key. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every key held by this store in one step.
    ///
    /// No concurrent read may observe a partially cleared store.
    async fn clear_all(&self) -> AppResult<()>;
}
