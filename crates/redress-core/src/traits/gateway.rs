//! Auth gateway trait.

use async_trait::async_trait;

use crate::types::outcome::RawFailure;
use crate::types::wire::{LoginResponse, ProfilePayload};

/// The four network operations of the authentication lifecycle.
///
/// The gateway is token-agnostic: the shared transport attaches the bearer
/// token once the session controller sets it. No operation retries beyond
/// the single login fallback; each is one request/response round trip.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Attempt a login against the primary admin endpoint, falling back to
    /// the general endpoint once if — and only if — the primary fails for
    /// any reason.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, RawFailure>;

    /// Fetch the current user's profile using the transport's stored token.
    async fn fetch_profile(&self) -> Result<ProfilePayload, RawFailure>;

    /// Notify the backend of logout. Best-effort; a failure here must
    /// never block client-side cleanup.
    async fn logout(&self) -> Result<(), RawFailure>;
}
