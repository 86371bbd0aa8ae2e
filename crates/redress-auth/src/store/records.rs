//! Versioned encode/decode boundary for persisted session records.
//!
//! Every value written to the store is wrapped as `{"v": 1, "data": …}`.
//! A missing, malformed, or wrong-version value decodes to "absent", so
//! legacy or corrupted persisted data can never poison session state —
//! restore then tears the session down through the normal missing-token
//! path.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use redress_core::result::AppResult;
use redress_core::traits::store::SessionStore;
use redress_core::types::capability::AdminFeatures;
use redress_core::types::security::SecurityInfo;

use super::keys;

const VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    v: u32,
    data: T,
}

/// Wrap a value in the current envelope version.
pub fn encode<T: Serialize>(data: &T) -> AppResult<String> {
    Ok(serde_json::to_string(&Envelope {
        v: VERSION,
        data,
    })?)
}

/// Unwrap an envelope; anything unexpected degrades to `None`.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str::<Envelope<T>>(raw) {
        Ok(envelope) if envelope.v == VERSION => Some(envelope.data),
        Ok(envelope) => {
            warn!(key, version = envelope.v, "discarding persisted record with unknown version");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "discarding malformed persisted record");
            None
        }
    }
}

async fn load<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> AppResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(decode(key, &raw)),
        None => Ok(None),
    }
}

/// Load the persisted bearer token.
pub async fn load_token(store: &dyn SessionStore) -> AppResult<Option<String>> {
    load(store, keys::TOKEN).await
}

/// Persist the bearer token.
pub async fn save_token(store: &dyn SessionStore, token: &str) -> AppResult<()> {
    store.set(keys::TOKEN, &encode(&token)?).await
}

/// Load the cached capability flags.
pub async fn load_admin_features(store: &dyn SessionStore) -> AppResult<Option<AdminFeatures>> {
    load(store, keys::ADMIN_FEATURES).await
}

/// Persist capability flags from a login response.
pub async fn save_admin_features(
    store: &dyn SessionStore,
    features: &AdminFeatures,
) -> AppResult<()> {
    store.set(keys::ADMIN_FEATURES, &encode(features)?).await
}

/// Load the cached security metadata.
pub async fn load_security_info(store: &dyn SessionStore) -> AppResult<Option<SecurityInfo>> {
    load(store, keys::SECURITY_INFO).await
}

/// Persist security metadata from a login response.
pub async fn save_security_info(store: &dyn SessionStore, info: &SecurityInfo) -> AppResult<()> {
    store.set(keys::SECURITY_INFO, &encode(info)?).await
}
