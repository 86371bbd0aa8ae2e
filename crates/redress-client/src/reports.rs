//! Monthly report download client.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use redress_core::error::AppError;
use redress_core::result::AppResult;

use crate::client::ApiClient;

/// A downloaded monthly report.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    /// Raw PDF bytes.
    pub bytes: Bytes,
    /// Suggested file name, `grievance-report-<MM>-<YYYY>.pdf`.
    pub file_name: String,
}

/// Client for `GET /api/admin/reports/monthly`.
#[derive(Debug, Clone)]
pub struct ReportClient {
    api: Arc<ApiClient>,
}

impl ReportClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Download the monthly PDF report.
    pub async fn download_monthly(&self, month: u32, year: i32) -> AppResult<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation(format!(
                "Invalid month: {month}. Expected 1-12"
            )));
        }

        let path = format!("/api/admin/reports/monthly?month={month:02}&year={year}");
        let bytes = self.api.get_bytes(&path).await?;
        debug!(month, year, size = bytes.len(), "downloaded monthly report");

        Ok(MonthlyReport {
            bytes,
            file_name: format!("grievance-report-{month:02}-{year}.pdf"),
        })
    }
}
