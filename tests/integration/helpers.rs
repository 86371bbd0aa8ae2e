//! Shared test helpers: a scripted axum mock backend driven through the
//! real transport, gateway, and session controller.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::{Path, RawQuery, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get, post, put};
use http::StatusCode;
use serde_json::{Value, json};

use redress_auth::{HttpAuthGateway, MemorySessionStore, SessionController};
use redress_client::ApiClient;
use redress_core::config::api::ApiConfig;

/// A scripted endpoint response: status code plus JSON body.
pub type Scripted = (u16, Value);

/// Scripted responses and observed traffic for the mock backend.
#[derive(Debug)]
pub struct MockState {
    pub admin_login: Mutex<Scripted>,
    pub login: Mutex<Scripted>,
    pub me: Mutex<Scripted>,
    pub logout_status: Mutex<u16>,
    pub grievances: Mutex<Value>,
    pub stats: Mutex<Value>,

    pub admin_login_hits: AtomicUsize,
    pub login_hits: AtomicUsize,
    pub me_hits: AtomicUsize,
    pub logout_hits: AtomicUsize,

    /// Last `Authorization: Bearer …` token seen on any request.
    pub last_bearer: Mutex<Option<String>>,
    /// Last query string seen on the grievance list endpoint.
    pub last_list_query: Mutex<Option<String>>,
    /// `(id, body)` of every grievance update received.
    pub updates: Mutex<Vec<(String, Value)>>,
    /// IDs of every grievance delete received.
    pub deletes: Mutex<Vec<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            admin_login: Mutex::new((404, json!({"message": "Not found"}))),
            login: Mutex::new((401, json!({"message": "Invalid credentials"}))),
            me: Mutex::new((401, json!({"message": "Unauthorized"}))),
            logout_status: Mutex::new(200),
            grievances: Mutex::new(json!([])),
            stats: Mutex::new(json!({
                "totalGrievances": 0,
                "pending": 0,
                "inProgress": 0,
                "resolved": 0,
                "rejected": 0,
            })),
            admin_login_hits: AtomicUsize::new(0),
            login_hits: AtomicUsize::new(0),
            me_hits: AtomicUsize::new(0),
            logout_hits: AtomicUsize::new(0),
            last_bearer: Mutex::new(None),
            last_list_query: Mutex::new(None),
            updates: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }
}

impl MockState {
    pub fn script(&self, slot: &Mutex<Scripted>, status: u16, body: Value) {
        *slot.lock().unwrap() = (status, body);
    }
}

/// Mock backend bound to an ephemeral port.
pub struct TestBackend {
    pub state: Arc<MockState>,
    pub base_url: String,
}

impl TestBackend {
    /// Spawn the mock backend with default (all-rejecting) scripts.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend died");
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    /// A real transport pointed at this backend.
    pub fn api(&self) -> Arc<ApiClient> {
        api_for(&self.base_url)
    }

    /// A real controller (gateway + in-memory store) over this backend.
    pub fn controller(&self) -> (SessionController, Arc<MemorySessionStore>, Arc<ApiClient>) {
        let api = self.api();
        let store = Arc::new(MemorySessionStore::new());
        let gateway = Arc::new(HttpAuthGateway::new(Arc::clone(&api)));
        let controller = SessionController::new(
            gateway,
            Arc::clone(&store) as Arc<dyn redress_core::traits::SessionStore>,
            api.bearer(),
        );
        (controller, store, api)
    }
}

/// Build an [`ApiClient`] for an arbitrary base URL (e.g. an unused port).
pub fn api_for(base_url: &str) -> Arc<ApiClient> {
    Arc::new(
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        })
        .expect("failed to build api client"),
    )
}

/// An address nothing listens on, for connection-refused scenarios.
pub async fn unused_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/auth/admin-login", post(admin_login))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/admin/grievances", get(list_grievances))
        .route("/api/admin/grievances/{id}", put(update_grievance))
        .route("/api/admin/grievances/{id}", delete(delete_grievance))
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/reports/monthly", get(monthly_report))
        .with_state(state)
}

/// The PDF bytes served by the mock report endpoint.
pub const REPORT_BYTES: &[u8] = b"%PDF-1.4 mock report";

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

fn scripted(slot: &Mutex<Scripted>) -> (StatusCode, Json<Value>) {
    let (status, body) = slot.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

async fn admin_login(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.admin_login_hits.fetch_add(1, Ordering::SeqCst);
    scripted(&state.admin_login)
}

async fn login(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.login_hits.fetch_add(1, Ordering::SeqCst);
    scripted(&state.login)
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.me_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_bearer.lock().unwrap() = bearer_of(&headers);
    scripted(&state.me)
}

async fn logout(State(state): State<Arc<MockState>>) -> (StatusCode, Json<Value>) {
    state.logout_hits.fetch_add(1, Ordering::SeqCst);
    let status = *state.logout_status.lock().unwrap();
    (StatusCode::from_u16(status).unwrap(), Json(json!({})))
}

async fn list_grievances(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    *state.last_bearer.lock().unwrap() = bearer_of(&headers);
    *state.last_list_query.lock().unwrap() = query;
    (StatusCode::OK, Json(state.grievances.lock().unwrap().clone()))
}

async fn update_grievance(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.updates.lock().unwrap().push((id, body));
    (StatusCode::OK, Json(json!({"message": "Grievance updated"})))
}

async fn delete_grievance(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    state.deletes.lock().unwrap().push(id);
    (StatusCode::OK, Json(json!({"message": "Grievance deleted"})))
}

async fn stats(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    *state.last_bearer.lock().unwrap() = bearer_of(&headers);
    (StatusCode::OK, Json(state.stats.lock().unwrap().clone()))
}

async fn monthly_report(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Vec<u8>) {
    *state.last_bearer.lock().unwrap() = bearer_of(&headers);
    (StatusCode::OK, REPORT_BYTES.to_vec())
}
