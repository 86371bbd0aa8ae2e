//! Admin capability flags.

use serde::{Deserialize, Serialize};

/// Capability set granted to an administrator at login.
///
/// Flags the backend omits default to `false`; the console treats the set
/// as purely informational UI-level permissions, never security boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFeatures {
    /// May manage user accounts.
    #[serde(default)]
    pub can_manage_users: bool,
    /// May edit and resolve grievances.
    #[serde(default)]
    pub can_manage_grievances: bool,
    /// May download reports.
    #[serde(default)]
    pub can_view_reports: bool,
}
