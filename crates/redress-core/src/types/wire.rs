//! Wire-format types for the auth endpoints.
//!
//! The backend grew two generations of response envelopes; everything here
//! parses both and normalizes to one internal shape so the rest of the
//! console never branches on response vintage.

use serde::{Deserialize, Serialize};

use super::capability::AdminFeatures;
use super::security::SecurityInfo;
use super::user::UserProfile;

/// Request body for both login endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password; sent over the transport, never stored.
    pub password: String,
}

/// Response body of `POST /api/auth/admin-login` and `POST /api/auth/login`.
///
/// Every field is optional on the wire; the session controller decides
/// which absences are fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    /// Issued bearer token.
    #[serde(default)]
    pub token: Option<String>,
    /// The authenticated user.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Capability flags; only the admin endpoint sends these.
    #[serde(rename = "adminFeatures", default)]
    pub admin_features: Option<AdminFeatures>,
    /// Login security metadata; only the admin endpoint sends this.
    #[serde(rename = "securityInfo", default)]
    pub security_info: Option<SecurityInfo>,
    /// Optional server-supplied greeting.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body of `GET /api/auth/me`, in either envelope generation.
///
/// The current backend wraps the profile as `{user, adminFeatures?,
/// securityInfo?}`; the legacy one returns the profile bare. Anything else
/// is a decode failure surfaced loudly by the transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    /// Current envelope.
    Wrapped {
        /// The profile itself.
        user: UserProfile,
        /// Capability flags, when the backend repeats them here.
        #[serde(rename = "adminFeatures", default)]
        admin_features: Option<AdminFeatures>,
        /// Security metadata, when the backend repeats it here.
        #[serde(rename = "securityInfo", default)]
        security_info: Option<SecurityInfo>,
    },
    /// Legacy bare profile.
    Bare(UserProfile),
}

/// Normalized form of [`ProfileResponse`].
#[derive(Debug, Clone)]
pub struct ProfilePayload {
    /// The fetched profile.
    pub profile: UserProfile,
    /// Capability flags carried alongside the profile, if any.
    pub admin_features: Option<AdminFeatures>,
    /// Security metadata carried alongside the profile, if any.
    pub security_info: Option<SecurityInfo>,
}

impl ProfileResponse {
    /// Collapse both envelope generations into one payload.
    pub fn into_payload(self) -> ProfilePayload {
        match self {
            Self::Wrapped {
                user,
                admin_features,
                security_info,
            } => ProfilePayload {
                profile: user,
                admin_features,
                security_info,
            },
            Self::Bare(profile) => ProfilePayload {
                profile,
                admin_features: None,
                security_info: None,
            },
        }
    }
}

/// Field-level validation error inside an [`ErrorBody`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldError {
    /// Human-readable message for the offending field.
    pub msg: String,
    /// Name of the field, when the backend identifies it.
    #[serde(default)]
    pub param: Option<String>,
}

/// Lenient parse of a non-2xx response body.
///
/// The backend's error bodies are inconsistent across routes, so every
/// field is optional and an unparseable body decodes to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Primary error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Field validation errors, express-validator style.
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
    /// Lockout duration in minutes on a 429.
    #[serde(rename = "lockoutTime", default)]
    pub lockout_time: Option<u64>,
    /// Login attempts left before lockout.
    #[serde(default)]
    pub remaining: Option<u32>,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
}
