//! Integration tests for the grievance, stats, and report clients
//! against the scripted mock backend.

mod helpers;

use std::sync::Arc;

use serde_json::json;

use redress_client::grievances::{GrievanceClient, GrievanceFilter, GrievanceStatus};
use redress_client::reports::ReportClient;

fn grievance_json(id: &str, subject: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "subject": subject,
        "description": "description",
        "category": "infrastructure",
        "priority": "high",
        "status": "pending",
        "createdAt": "2026-02-01T08:00:00Z",
        "userId": {"username": "stud1", "fullName": "Student One"},
    })
}

#[tokio::test]
async fn list_sends_bearer_and_filter_params() {
    let backend = helpers::TestBackend::spawn().await;
    *backend.state.grievances.lock().unwrap() =
        json!([grievance_json("g1", "Broken AC"), grievance_json("g2", "Leaking roof")]);
    let api = backend.api();
    api.bearer().set("tok-admin");

    let filter = GrievanceFilter {
        status: Some("pending".to_string()),
        category: None,
        priority: Some("high".to_string()),
    };
    let records = GrievanceClient::new(Arc::clone(&api))
        .list(&filter)
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].subject, "Broken AC");
    assert_eq!(
        records[0].reporter.as_ref().unwrap().display_name(),
        "Student One"
    );
    assert_eq!(
        backend.state.last_bearer.lock().unwrap().as_deref(),
        Some("tok-admin")
    );
    assert_eq!(
        backend.state.last_list_query.lock().unwrap().as_deref(),
        Some("status=pending&priority=high")
    );
}

#[tokio::test]
async fn empty_filter_sends_no_query_string() {
    let backend = helpers::TestBackend::spawn().await;
    let api = backend.api();

    let records = GrievanceClient::new(api)
        .list(&GrievanceFilter::default())
        .await
        .unwrap();

    assert!(records.is_empty());
    assert_eq!(backend.state.last_list_query.lock().unwrap().as_deref(), None);
}

#[tokio::test]
async fn update_puts_status_and_resolution() {
    let backend = helpers::TestBackend::spawn().await;
    let api = backend.api();

    GrievanceClient::new(api)
        .update("g7", GrievanceStatus::Resolved, "Replaced the unit")
        .await
        .unwrap();

    let updates = backend.state.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    let (id, body) = &updates[0];
    assert_eq!(id, "g7");
    assert_eq!(body["status"], "resolved");
    assert_eq!(body["resolution"], "Replaced the unit");
}

#[tokio::test]
async fn delete_targets_the_record() {
    let backend = helpers::TestBackend::spawn().await;
    let api = backend.api();

    GrievanceClient::new(api).delete("g9").await.unwrap();

    assert_eq!(*backend.state.deletes.lock().unwrap(), vec!["g9".to_string()]);
}

#[tokio::test]
async fn stats_parses_the_summary() {
    let backend = helpers::TestBackend::spawn().await;
    *backend.state.stats.lock().unwrap() = json!({
        "totalGrievances": 12,
        "pending": 5,
        "inProgress": 3,
        "resolved": 3,
        "rejected": 1,
    });
    let api = backend.api();
    api.bearer().set("tok-admin");

    let stats = GrievanceClient::new(api).stats().await.unwrap();

    assert_eq!(stats.total_grievances, 12);
    assert_eq!(stats.in_progress, 3);
    assert_eq!(
        backend.state.last_bearer.lock().unwrap().as_deref(),
        Some("tok-admin")
    );
}

#[tokio::test]
async fn report_downloads_bytes_with_suggested_name() {
    let backend = helpers::TestBackend::spawn().await;
    let api = backend.api();
    api.bearer().set("tok-admin");

    let report = ReportClient::new(api)
        .download_monthly(3, 2026)
        .await
        .unwrap();

    assert_eq!(&report.bytes[..], helpers::REPORT_BYTES);
    assert_eq!(report.file_name, "grievance-report-03-2026.pdf");
    assert_eq!(
        backend.state.last_bearer.lock().unwrap().as_deref(),
        Some("tok-admin")
    );
}

#[tokio::test]
async fn report_rejects_an_out_of_range_month() {
    let backend = helpers::TestBackend::spawn().await;
    let api = backend.api();

    let err = ReportClient::new(api).download_monthly(13, 2026).await;

    assert!(err.is_err());
}
