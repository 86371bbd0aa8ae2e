//! Session controller — owns the authentication state machine.
//!
//! Legal transitions: `Loading → {Anonymous, Authenticated}`,
//! `Anonymous → Authenticated` (login), `Authenticated → Anonymous`
//! (logout or invalidated restore). A re-login while authenticated is an
//! idempotent replacement.
//!
//! Every mutating operation serializes on one guard, and every commit that
//! changes the token is mirrored to the persisted store before the state
//! settles, so no consumer ever observes a partially-authenticated
//! session.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use redress_client::BearerSlot;
use redress_core::error::AppError;
use redress_core::result::AppResult;
use redress_core::traits::gateway::AuthGateway;
use redress_core::traits::store::SessionStore;
use redress_core::types::capability::AdminFeatures;
use redress_core::types::outcome::{FailureKind, LoginFailure, LoginSuccess};
use redress_core::types::security::SecurityInfo;
use redress_core::types::session::SessionState;
use redress_core::types::user::UserProfile;

use crate::classify;
use crate::store::records;

/// Orchestrates login, logout, restore, and profile refresh.
///
/// Consumers share the controller behind an `Arc`; [`subscribe`] hands out
/// a watch receiver for reactive updates and [`current`] is a non-blocking
/// snapshot of the latest committed state.
///
/// [`subscribe`]: SessionController::subscribe
/// [`current`]: SessionController::current
pub struct SessionController {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
    bearer: BearerSlot,
    state: watch::Sender<SessionState>,
    /// Serializes all mutating operations; commits never interleave.
    op_guard: Mutex<()>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl SessionController {
    /// Create a controller in the `Loading` state.
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn SessionStore>,
        bearer: BearerSlot,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            gateway,
            store,
            bearer,
            state,
            op_guard: Mutex::new(()),
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token. A cancelled token makes in-flight
    /// operations discard their eventual responses instead of committing.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Snapshot of the latest committed state. Never blocks.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to committed state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn commit(&self, state: SessionState) {
        // send_replace rather than send: commits must land even with no
        // active subscribers.
        self.state.send_replace(state);
    }

    /// Re-establish the session from the persisted token at startup.
    ///
    /// With no persisted token this settles to `Anonymous` without any
    /// network call. With one, the profile fetch validates it; any failure
    /// wipes the store and degrades to `Anonymous`. Never raises.
    pub async fn restore_session(&self) {
        let _op = self.op_guard.lock().await;

        let token = match records::load_token(self.store.as_ref()).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no persisted token, starting anonymous");
                self.commit(SessionState::Anonymous);
                return;
            }
            Err(e) => {
                warn!(error = %e, "session store unreadable, starting anonymous");
                self.commit(SessionState::Anonymous);
                return;
            }
        };

        self.bearer.set(&token);

        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("restore cancelled, discarding");
                return;
            }
            fetched = self.gateway.fetch_profile() => fetched,
        };

        match fetched {
            Ok(payload) => {
                let profile = self
                    .merge_cached(payload.profile, payload.admin_features, payload.security_info)
                    .await;
                info!(username = %profile.username, "session restored");
                self.commit(SessionState::Authenticated { token, profile });
            }
            Err(failure) => {
                warn!(error = %failure, "persisted token rejected, clearing session");
                if let Err(e) = self.store.clear_all().await {
                    warn!(error = %e, "failed to clear session store");
                }
                self.bearer.clear();
                self.commit(SessionState::Anonymous);
            }
        }
    }

    /// Attempt a login. Always returns a value — the failure side is the
    /// user-facing taxonomy, never an internal error type.
    ///
    /// On any failure the session stays exactly as it was; only a fully
    /// validated admin response is persisted and committed.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginSuccess, LoginFailure> {
        let _op = self.op_guard.lock().await;

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("login cancelled, discarding");
                return Err(LoginFailure::from_kind(FailureKind::ServerError {
                    message: "Operation cancelled".to_string(),
                }));
            }
            response = self.gateway.login(username, password) => response,
        };

        let response = match response {
            Ok(response) => response,
            Err(failure) => {
                let failure = classify::to_login_failure(failure);
                debug!(message = %failure, "login failed");
                return Err(failure);
            }
        };

        let Some(user) = response.user else {
            return Err(invalid_response());
        };
        if !user.user_type.is_admin() {
            info!(username = %user.username, user_type = %user.user_type, "non-admin login rejected");
            return Err(LoginFailure::from_kind(FailureKind::AccessDenied));
        }
        let Some(token) = response.token else {
            return Err(invalid_response());
        };

        // Mirror to the store before the state settles. A persist failure
        // aborts the commit so session and store never diverge.
        if let Err(e) = self
            .persist(&token, &response.admin_features, &response.security_info)
            .await
        {
            warn!(error = %e, "failed to persist session, aborting login");
            let _ = self.store.clear_all().await;
            return Err(LoginFailure::from_kind(FailureKind::ServerError {
                message: "Failed to persist session".to_string(),
            }));
        }

        self.bearer.set(&token);

        let mut profile = user;
        // Top-level login blobs supersede anything embedded in the profile.
        if response.admin_features.is_some() {
            profile.admin_features = response.admin_features;
        }
        if response.security_info.is_some() {
            profile.security_info = response.security_info;
        }

        info!(username = %profile.username, "admin login successful");
        self.commit(SessionState::Authenticated {
            token,
            profile: profile.clone(),
        });

        Ok(LoginSuccess {
            message: response
                .message
                .unwrap_or_else(|| "Login successful".to_string()),
            profile,
        })
    }

    /// Log out. Fires the best-effort server notification when a token is
    /// present, then unconditionally clears everything client-side. Never
    /// signals failure — an unreachable server must not trap the operator
    /// in an authenticated-looking state.
    pub async fn logout(&self) {
        let _op = self.op_guard.lock().await;

        if self.bearer.get().is_some() {
            if let Err(failure) = self.gateway.logout().await {
                debug!(error = %failure, "server logout failed, continuing with client cleanup");
            }
        }

        if let Err(e) = self.store.clear_all().await {
            warn!(error = %e, "failed to clear session store on logout");
        }
        self.bearer.clear();
        self.commit(SessionState::Anonymous);
        info!("logged out");
    }

    /// Re-fetch the profile without touching the token, refreshing the
    /// capability data of an authenticated session. Unlike restore, a
    /// failure here leaves the session intact.
    pub async fn fetch_current_profile(&self) -> AppResult<UserProfile> {
        let _op = self.op_guard.lock().await;

        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(AppError::cancelled("Profile refresh cancelled"));
            }
            fetched = self.gateway.fetch_profile() => fetched,
        };
        let payload = fetched.map_err(AppError::from)?;

        let profile = self
            .merge_cached(payload.profile, payload.admin_features, payload.security_info)
            .await;

        if let SessionState::Authenticated { token, .. } = self.current() {
            self.commit(SessionState::Authenticated {
                token,
                profile: profile.clone(),
            });
        }

        Ok(profile)
    }

    /// Merge a fetched profile with the cached capability blobs.
    ///
    /// Cached values take precedence: the login response is the only
    /// source of some admin metadata, and profile fetches may omit it.
    async fn merge_cached(
        &self,
        mut profile: UserProfile,
        response_features: Option<AdminFeatures>,
        response_security: Option<SecurityInfo>,
    ) -> UserProfile {
        let cached_features = records::load_admin_features(self.store.as_ref())
            .await
            .unwrap_or_default();
        let cached_security = records::load_security_info(self.store.as_ref())
            .await
            .unwrap_or_default();

        if let Some(features) = cached_features.or(response_features) {
            profile.admin_features = Some(features);
        }
        if let Some(security) = cached_security.or(response_security) {
            profile.security_info = Some(security);
        }
        profile
    }

    async fn persist(
        &self,
        token: &str,
        features: &Option<AdminFeatures>,
        security: &Option<SecurityInfo>,
    ) -> AppResult<()> {
        records::save_token(self.store.as_ref(), token).await?;
        if let Some(features) = features {
            records::save_admin_features(self.store.as_ref(), features).await?;
        }
        if let Some(security) = security {
            records::save_security_info(self.store.as_ref(), security).await?;
        }
        Ok(())
    }
}

fn invalid_response() -> LoginFailure {
    LoginFailure::from_kind(FailureKind::ServerError {
        message: "Invalid response from server".to_string(),
    })
}
