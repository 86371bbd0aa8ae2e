//! Shared HTTP transport with automatic bearer-token attachment.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use redress_core::config::api::ApiConfig;
use redress_core::error::AppError;
use redress_core::result::AppResult;
use redress_core::types::outcome::RawFailure;

/// Shared slot holding the current bearer token.
///
/// This replaces a per-request interceptor: the session controller writes
/// the token here once, and every request made through [`ApiClient`]
/// reads it at send time. Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct BearerSlot(Arc<RwLock<Option<String>>>);

impl BearerSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a token; subsequent requests carry it.
    pub fn set(&self, token: &str) {
        if let Ok(mut slot) = self.0.write() {
            *slot = Some(token.to_string());
        }
    }

    /// Remove the token; subsequent requests are anonymous.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.write() {
            *slot = None;
        }
    }

    /// Snapshot the current token.
    pub fn get(&self) -> Option<String> {
        self.0.read().ok().and_then(|slot| slot.clone())
    }
}

/// HTTP client for the grievance backend.
///
/// Owns the reqwest client, the base URL, and the bearer slot. All
/// transport failures are normalized into [`RawFailure`] so callers never
/// see reqwest errors directly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: BearerSlot,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid api.base_url '{}': {e}", config.base_url))
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            bearer: BearerSlot::new(),
        })
    }

    /// The bearer slot shared with the session controller.
    pub fn bearer(&self) -> BearerSlot {
        self.bearer.clone()
    }

    /// GET a JSON-decoded response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RawFailure> {
        let url = self.url(path)?;
        let response = self.execute(self.http.get(url)).await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RawFailure> {
        let url = self.url(path)?;
        let response = self.execute(self.http.post(url).json(body)).await?;
        Self::decode(response).await
    }

    /// POST with no body, discarding whatever comes back on success.
    pub async fn post_empty(&self, path: &str) -> Result<(), RawFailure> {
        let url = self.url(path)?;
        self.execute(self.http.post(url)).await?;
        Ok(())
    }

    /// PUT a JSON body, discarding the response on success.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), RawFailure> {
        let url = self.url(path)?;
        self.execute(self.http.put(url).json(body)).await?;
        Ok(())
    }

    /// DELETE, discarding the response on success.
    pub async fn delete(&self, path: &str) -> Result<(), RawFailure> {
        let url = self.url(path)?;
        self.execute(self.http.delete(url)).await?;
        Ok(())
    }

    /// GET a raw byte response (report downloads).
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes, RawFailure> {
        let url = self.url(path)?;
        let response = self.execute(self.http.get(url)).await?;
        response.bytes().await.map_err(|e| RawFailure::Network {
            detail: format!("failed to read response body: {e}"),
        })
    }

    fn url(&self, path: &str) -> Result<Url, RawFailure> {
        self.base_url.join(path).map_err(|e| RawFailure::Network {
            detail: format!("invalid request path '{path}': {e}"),
        })
    }

    /// Send a request with the bearer token attached, normalizing failures.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RawFailure> {
        let request = match self.bearer.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| RawFailure::Network {
            detail: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or_default();
        debug!(status = status.as_u16(), "backend returned error status");
        Err(RawFailure::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RawFailure> {
        let text = response.text().await.map_err(|e| RawFailure::Network {
            detail: format!("failed to read response body: {e}"),
        })?;
        serde_json::from_str(&text).map_err(|e| RawFailure::Decode {
            detail: e.to_string(),
        })
    }
}
