//! Persisted store key names.
//!
//! All keys carry the `auth.` prefix so they never collide with unrelated
//! persisted data sharing the same document.

/// The bearer token.
pub const TOKEN: &str = "auth.token";

/// Cached capability flags from the login response.
pub const ADMIN_FEATURES: &str = "auth.admin_features";

/// Cached security metadata from the login response.
pub const SECURITY_INFO: &str = "auth.security_info";
