//! Typed client for the admin grievance endpoints.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use redress_core::result::AppResult;

use crate::client::ApiClient;

/// Grievance workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStatus {
    /// Filed, not yet picked up.
    Pending,
    /// Being worked on.
    InProgress,
    /// Closed with a resolution.
    Resolved,
    /// Closed without action.
    Rejected,
}

impl GrievanceStatus {
    /// Wire/CLI spelling of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GrievanceStatus {
    type Err = redress_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(redress_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: pending, in_progress, resolved, rejected"
            ))),
        }
    }
}

/// Grievance subject area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrievanceCategory {
    Academic,
    Administrative,
    Infrastructure,
    Hostel,
    Library,
    Examination,
    Other,
}

impl GrievanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Administrative => "administrative",
            Self::Infrastructure => "infrastructure",
            Self::Hostel => "hostel",
            Self::Library => "library",
            Self::Examination => "examination",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for GrievanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grievance priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrievancePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl GrievancePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for GrievancePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The reporter populated into a grievance record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

impl Reporter {
    /// Best display name for table output.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// File attached to a grievance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub file_path: String,
}

/// One grievance record as returned by `GET /api/admin/grievances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrievanceRecord {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    pub description: String,
    pub category: GrievanceCategory,
    pub priority: GrievancePriority,
    pub status: GrievanceStatus,
    /// Resolution text, present once the grievance is closed.
    #[serde(default)]
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Populated reporter; the backend may fail to populate it.
    #[serde(rename = "userId", default)]
    pub reporter: Option<Reporter>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl GrievanceRecord {
    /// Case-insensitive substring match over subject, description,
    /// reporter identity, and category — the console-side search.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        let reporter_hit = self.reporter.as_ref().is_some_and(|r| {
            [&r.full_name, &r.username, &r.email]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&query))
        });
        self.subject.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.category.as_str().contains(&query)
            || reporter_hit
    }
}

/// Server-side filters for the grievance list.
#[derive(Debug, Clone, Default)]
pub struct GrievanceFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl GrievanceFilter {
    /// Render as a query string, empty filters producing an empty string.
    fn query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(status) = &self.status {
            params.push(format!("status={status}"));
        }
        if let Some(category) = &self.category {
            params.push(format!("category={category}"));
        }
        if let Some(priority) = &self.priority {
            params.push(format!("priority={priority}"));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Aggregate counts from `GET /api/admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_grievances: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub rejected: u64,
}

#[derive(Debug, Serialize)]
struct UpdateGrievanceRequest<'a> {
    status: GrievanceStatus,
    resolution: &'a str,
}

/// Client for the admin grievance endpoints.
#[derive(Debug, Clone)]
pub struct GrievanceClient {
    api: Arc<ApiClient>,
}

impl GrievanceClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List grievances, filtered server-side.
    pub async fn list(&self, filter: &GrievanceFilter) -> AppResult<Vec<GrievanceRecord>> {
        let path = format!("/api/admin/grievances{}", filter.query_string());
        let records: Vec<GrievanceRecord> = self.api.get_json(&path).await?;
        debug!(count = records.len(), "fetched grievances");
        Ok(records)
    }

    /// Update a grievance's status and resolution text.
    pub async fn update(
        &self,
        id: &str,
        status: GrievanceStatus,
        resolution: &str,
    ) -> AppResult<()> {
        let body = UpdateGrievanceRequest { status, resolution };
        self.api
            .put_json(&format!("/api/admin/grievances/{id}"), &body)
            .await?;
        Ok(())
    }

    /// Delete a grievance permanently.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.api
            .delete(&format!("/api/admin/grievances/{id}"))
            .await?;
        Ok(())
    }

    /// Fetch aggregate counts.
    pub async fn stats(&self) -> AppResult<StatsSummary> {
        Ok(self.api.get_json("/api/admin/stats").await?)
    }
}
