//! In-memory session state.

use serde::Serialize;

use super::user::UserProfile;

/// Authentication state of the console, owned by the session controller.
///
/// The token and profile live inside the `Authenticated` variant so a
/// profile without a validated token (or the reverse) cannot be
/// represented. The variant tag doubles as the derived status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    /// Startup state, before restore has settled.
    #[default]
    Loading,
    /// No valid credentials.
    Anonymous,
    /// Signed in as an administrator.
    Authenticated {
        /// The accepted bearer token.
        token: String,
        /// The validated admin profile.
        profile: UserProfile,
    },
}

impl SessionState {
    /// Whether the session holds validated credentials.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Whether restore has settled yet.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    /// The current profile, when authenticated.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }

    /// The current token, when authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }
}
