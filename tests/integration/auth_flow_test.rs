//! Integration tests for the session and authentication lifecycle,
//! driven through the real transport against a scripted mock backend.

mod helpers;

use std::sync::atomic::Ordering;

use serde_json::json;

use redress_auth::store::{keys, records};
use redress_core::traits::SessionStore;
use redress_core::types::session::SessionState;

fn admin_login_body() -> serde_json::Value {
    json!({
        "token": "tok-abc",
        "user": {"username": "admin1", "fullName": "Admin One", "userType": "admin"},
        "adminFeatures": {"canManageUsers": true, "canManageGrievances": true, "canViewReports": true},
        "securityInfo": {"clientIP": "127.0.0.1"},
        "message": "Welcome back",
    })
}

#[tokio::test]
async fn login_success_commits_session_and_store() {
    let backend = helpers::TestBackend::spawn().await;
    backend
        .state
        .script(&backend.state.admin_login, 200, admin_login_body());
    let (controller, store, _api) = backend.controller();
    controller.restore_session().await;

    let success = controller.login("admin1", "secret").await.unwrap();

    assert_eq!(success.message, "Welcome back");
    let state = controller.current();
    assert_eq!(state.token(), Some("tok-abc"));
    assert_eq!(state.profile().unwrap().username, "admin1");
    let features = state.profile().unwrap().admin_features.as_ref().unwrap();
    assert!(features.can_manage_users);
    assert_eq!(
        records::load_token(store.as_ref()).await.unwrap().as_deref(),
        Some("tok-abc")
    );
    // The primary endpoint succeeded, so the fallback never ran.
    assert_eq!(backend.state.login_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_admin_login_is_rejected_without_state_change() {
    let backend = helpers::TestBackend::spawn().await;
    backend.state.script(
        &backend.state.admin_login,
        200,
        json!({
            "token": "tok-student",
            "user": {"username": "stud1", "userType": "student"},
        }),
    );
    let (controller, store, _api) = backend.controller();
    controller.restore_session().await;

    let failure = controller.login("stud1", "pw").await.unwrap_err();

    assert!(failure.message().contains("Access denied"));
    assert_eq!(controller.current(), SessionState::Anonymous);
    assert_eq!(store.get(keys::TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn unreachable_server_yields_the_connectivity_message() {
    let base_url = helpers::unused_address().await;
    let api = helpers::api_for(&base_url);
    let store = std::sync::Arc::new(redress_auth::MemorySessionStore::new());
    let gateway = std::sync::Arc::new(redress_auth::HttpAuthGateway::new(api.clone()));
    let controller = redress_auth::SessionController::new(gateway, store, api.bearer());
    controller.restore_session().await;

    let failure = controller.login("admin1", "secret").await.unwrap_err();

    assert!(failure.message().starts_with("Cannot connect to server"));
    assert_eq!(controller.current(), SessionState::Anonymous);
}

#[tokio::test]
async fn rate_limited_login_reports_the_lockout_duration() {
    let backend = helpers::TestBackend::spawn().await;
    let limited = json!({"message": "Too many attempts", "lockoutTime": 5, "remaining": 0});
    backend
        .state
        .script(&backend.state.admin_login, 429, limited.clone());
    backend.state.script(&backend.state.login, 429, limited);
    let (controller, _store, _api) = backend.controller();
    controller.restore_session().await;

    let failure = controller.login("admin1", "secret").await.unwrap_err();

    assert!(failure.message().contains("5 minutes"));
    assert_eq!(failure.remaining, Some(0));
}

#[tokio::test]
async fn restore_with_rejected_token_clears_the_store() {
    let backend = helpers::TestBackend::spawn().await;
    let (controller, store, _api) = backend.controller();
    records::save_token(store.as_ref(), "tok-expired")
        .await
        .unwrap();

    controller.restore_session().await;

    assert_eq!(controller.current(), SessionState::Anonymous);
    assert_eq!(store.get(keys::TOKEN).await.unwrap(), None);
    assert_eq!(backend.state.me_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn restore_with_accepted_token_merges_cached_features() {
    let backend = helpers::TestBackend::spawn().await;
    backend.state.script(
        &backend.state.me,
        200,
        json!({"user": {"username": "admin1", "userType": "admin"}}),
    );
    let (controller, store, _api) = backend.controller();
    records::save_token(store.as_ref(), "tok-abc").await.unwrap();
    records::save_admin_features(
        store.as_ref(),
        &redress_core::types::AdminFeatures {
            can_manage_users: true,
            can_manage_grievances: false,
            can_view_reports: true,
        },
    )
    .await
    .unwrap();

    controller.restore_session().await;

    let state = controller.current();
    assert_eq!(state.token(), Some("tok-abc"));
    let features = state.profile().unwrap().admin_features.clone().unwrap();
    assert!(features.can_manage_users);
    assert!(features.can_view_reports);
}

#[tokio::test]
async fn logout_cleans_up_even_when_the_server_fails() {
    let backend = helpers::TestBackend::spawn().await;
    backend
        .state
        .script(&backend.state.admin_login, 200, admin_login_body());
    *backend.state.logout_status.lock().unwrap() = 500;
    let (controller, store, _api) = backend.controller();
    controller.restore_session().await;
    controller.login("admin1", "secret").await.unwrap();

    controller.logout().await;

    assert_eq!(controller.current(), SessionState::Anonymous);
    assert_eq!(store.get(keys::TOKEN).await.unwrap(), None);
    assert_eq!(store.get(keys::ADMIN_FEATURES).await.unwrap(), None);
    assert_eq!(store.get(keys::SECURITY_INFO).await.unwrap(), None);
    assert_eq!(backend.state.logout_hits.load(Ordering::SeqCst), 1);
}

// Known quirk, preserved deliberately: ANY primary failure triggers the
// fallback, genuine credential rejections included, and the caller sees
// the fallback's error.
#[tokio::test]
async fn fallback_runs_even_when_primary_rejects_credentials() {
    let backend = helpers::TestBackend::spawn().await;
    backend.state.script(
        &backend.state.admin_login,
        401,
        json!({"message": "Invalid admin credentials"}),
    );
    backend.state.script(
        &backend.state.login,
        401,
        json!({"message": "Invalid username or password"}),
    );
    let (controller, _store, _api) = backend.controller();
    controller.restore_session().await;

    let failure = controller.login("admin1", "wrong").await.unwrap_err();

    assert_eq!(backend.state.admin_login_hits.load(Ordering::SeqCst), 1);
    assert_eq!(backend.state.login_hits.load(Ordering::SeqCst), 1);
    assert_eq!(failure.message(), "Invalid username or password");
}

#[tokio::test]
async fn fallback_endpoint_can_complete_the_login() {
    let backend = helpers::TestBackend::spawn().await;
    // Primary missing entirely (old backend deployment).
    backend
        .state
        .script(&backend.state.admin_login, 404, json!({"message": "Not found"}));
    backend.state.script(
        &backend.state.login,
        200,
        json!({
            "token": "tok-legacy",
            "user": {"username": "admin1", "userType": "admin"},
        }),
    );
    let (controller, _store, _api) = backend.controller();
    controller.restore_session().await;

    let success = controller.login("admin1", "secret").await.unwrap();

    assert_eq!(success.message, "Login successful");
    assert_eq!(controller.current().token(), Some("tok-legacy"));
}

#[tokio::test]
async fn profile_fetch_carries_the_bearer_token() {
    let backend = helpers::TestBackend::spawn().await;
    backend
        .state
        .script(&backend.state.admin_login, 200, admin_login_body());
    backend.state.script(
        &backend.state.me,
        200,
        json!({"user": {"username": "admin1", "userType": "admin"}}),
    );
    let (controller, _store, _api) = backend.controller();
    controller.restore_session().await;
    controller.login("admin1", "secret").await.unwrap();

    let profile = controller.fetch_current_profile().await.unwrap();

    assert_eq!(profile.username, "admin1");
    assert_eq!(
        backend.state.last_bearer.lock().unwrap().as_deref(),
        Some("tok-abc")
    );
    // Cached login-time blobs survive a profile refresh that omits them.
    assert!(profile.admin_features.unwrap().can_manage_users);
}
