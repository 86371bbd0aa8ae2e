//! User profile and account type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::capability::AdminFeatures;
use super::security::SecurityInfo;

/// Account types known to the backend.
///
/// The console only cares about the admin / non-admin split; every
/// unrecognized wire value collapses into [`UserType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Administrator — the only type allowed to hold a console session.
    Admin,
    /// Student account.
    Student,
    /// Faculty account.
    Faculty,
    /// Any other account type.
    #[serde(other)]
    Other,
}

impl UserType {
    /// Check whether this account type may hold a console session.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile of the signed-in operator as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Account type; must be `admin` for a committed session.
    pub user_type: UserType,
    /// Capability flags granted at login; absent in profile-only responses.
    #[serde(default)]
    pub admin_features: Option<AdminFeatures>,
    /// Informational security metadata from login.
    #[serde(default)]
    pub security_info: Option<SecurityInfo>,
    /// Timestamp of the previous login.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}
