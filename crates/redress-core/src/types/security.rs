//! Informational login security metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Security metadata carried by the login response.
///
/// Every field is optional and none of them is enforced client-side;
/// `token_expiry` in particular is display-only — expiry is discovered by
/// the backend rejecting the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityInfo {
    /// When the current login occurred.
    #[serde(rename = "loginTime", default)]
    pub login_time: Option<DateTime<Utc>>,
    /// Client IP the backend observed at login.
    #[serde(rename = "clientIP", default)]
    pub client_ip: Option<String>,
    /// When the issued token expires.
    #[serde(rename = "tokenExpiry", default)]
    pub token_expiry: Option<DateTime<Utc>>,
}
