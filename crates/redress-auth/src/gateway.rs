//! HTTP auth gateway with login endpoint fallback.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use redress_client::ApiClient;
use redress_core::traits::gateway::AuthGateway;
use redress_core::types::outcome::RawFailure;
use redress_core::types::wire::{LoginRequest, LoginResponse, ProfilePayload, ProfileResponse};

const ADMIN_LOGIN_PATH: &str = "/api/auth/admin-login";
const LOGIN_PATH: &str = "/api/auth/login";
const ME_PATH: &str = "/api/auth/me";
const LOGOUT_PATH: &str = "/api/auth/logout";

/// Production [`AuthGateway`] speaking to the grievance backend.
///
/// Token handling lives entirely in the shared transport; this gateway
/// only knows paths and body shapes.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    api: Arc<ApiClient>,
}

impl HttpAuthGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    /// Try the admin endpoint, then fall back to the general endpoint once.
    ///
    /// The fallback fires on ANY primary failure, credential rejections
    /// included — the backend grew two login routes and the console cannot
    /// tell "admin endpoint missing" from "bad password" at this layer.
    /// The caller sees the second attempt's failure.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, RawFailure> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.api.post_json(ADMIN_LOGIN_PATH, &body).await {
            Ok(response) => Ok(response),
            Err(primary) => {
                warn!(error = %primary, "admin login endpoint failed, trying general endpoint");
                self.api.post_json(LOGIN_PATH, &body).await
            }
        }
    }

    async fn fetch_profile(&self) -> Result<ProfilePayload, RawFailure> {
        let response: ProfileResponse = self.api.get_json(ME_PATH).await?;
        Ok(response.into_payload())
    }

    async fn logout(&self) -> Result<(), RawFailure> {
        debug!("sending logout notification");
        self.api.post_empty(LOGOUT_PATH).await
    }
}
