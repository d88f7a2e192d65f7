//! Integration tests for the Bizniz admin client.
//!
//! This crate hosts a stub backend: an in-process axum server bound to an
//! ephemeral port, speaking the same unreliable dialect as the real API. The
//! knobs mirror the two unreliabilities the client compensates for:
//!
//! - [`EnvelopeStyle`] selects which JSON envelope list responses use;
//! - the accepted create paths select which POST candidates actually work,
//!   everything else answering 404.
//!
//! Every mutating request is appended to a request log so tests can assert
//! attempt order and memoization without reaching into client internals.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Company create paths the stub knows about.
pub const COMPANY_CREATE_PATHS: &[&str] = &["/api/companies", "/api/company"];

/// Employee create paths the stub knows about.
pub const EMPLOYEE_CREATE_PATHS: &[&str] = &[
    "/api/employees",
    "/api/employee",
    "/api/staff",
    "/api/personnel",
    "/api/users",
];

/// Which envelope list responses are wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStyle {
    /// `[ ... ]`
    Bare,
    /// `{ "collection": [...] }`
    Collection,
    /// `{ "data": [...] }`
    Data,
    /// `{ "data": { "collection": [...] } }`
    DataCollection,
    /// `{ "result": { "collection": [...] } }`
    ResultCollection,
    /// A shape no client rule recognizes.
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Company,
    Employee,
}

struct BackendState {
    companies: Mutex<Vec<Value>>,
    employees: Mutex<Vec<Value>>,
    envelope: EnvelopeStyle,
    accepted_company_creates: Vec<&'static str>,
    accepted_employee_creates: Vec<&'static str>,
    fail_lists: AtomicBool,
    next_id: AtomicU64,
    request_log: Mutex<Vec<String>>,
}

/// An in-process stub of the remote API.
pub struct StubBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
}

impl StubBackend {
    /// Start a stub with the given envelope style and accepted create paths.
    ///
    /// # Panics
    ///
    /// Panics when the ephemeral port cannot be bound; tests cannot proceed
    /// without it.
    pub async fn start(
        envelope: EnvelopeStyle,
        accepted_company_creates: &[&'static str],
        accepted_employee_creates: &[&'static str],
    ) -> Self {
        let state = Arc::new(BackendState {
            companies: Mutex::new(Vec::new()),
            employees: Mutex::new(Vec::new()),
            envelope,
            accepted_company_creates: accepted_company_creates.to_vec(),
            accepted_employee_creates: accepted_employee_creates.to_vec(),
            fail_lists: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            request_log: Mutex::new(Vec::new()),
        });

        let mut app = Router::new()
            .route(
                "/api/companies",
                get(list_companies).post(create_entity),
            )
            .route(
                "/api/employees",
                get(list_employees).post(create_entity),
            )
            .route(
                "/api/companies/{id}",
                put(update_company).delete(delete_company),
            )
            .route(
                "/api/employees/{id}",
                put(update_employee).delete(delete_employee),
            );
        for path in ["/api/company", "/api/employee", "/api/staff", "/api/personnel", "/api/users"] {
            app = app.route(path, post(create_entity));
        }
        let app = app.with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// A stub with defaults: bare-array lists, first create candidate accepted.
    pub async fn start_default() -> Self {
        Self::start(EnvelopeStyle::Bare, &["/api/companies"], &["/api/employees"]).await
    }

    /// Base URL of the stub.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a company record as-is (the test supplies the `_id`).
    pub fn seed_company(&self, entity: Value) {
        self.state.companies.lock().expect("companies lock").push(entity);
    }

    /// Seed an employee record as-is.
    pub fn seed_employee(&self, entity: Value) {
        self.state.employees.lock().expect("employees lock").push(entity);
    }

    /// Make subsequent list requests fail with HTTP 500.
    pub fn fail_lists(&self, fail: bool) {
        self.state.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the company records.
    #[must_use]
    pub fn companies(&self) -> Vec<Value> {
        self.state.companies.lock().expect("companies lock").clone()
    }

    /// Snapshot of the employee records.
    #[must_use]
    pub fn employees(&self) -> Vec<Value> {
        self.state.employees.lock().expect("employees lock").clone()
    }

    /// Every mutating request received so far, as `"METHOD /path"` lines.
    #[must_use]
    pub fn request_log(&self) -> Vec<String> {
        self.state.request_log.lock().expect("request log lock").clone()
    }
}

/// A unique, test-scoped path for the durable endpoint cache.
///
/// Each test passes its own tag so caches never bleed between tests.
#[must_use]
pub fn temp_cache_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "bizniz-it-{}-{tag}-endpoints.json",
        std::process::id()
    ))
}

/// Build the transport and resolver a client needs to talk to `backend`,
/// with a fresh endpoint cache keyed by `tag`.
#[must_use]
pub fn client_parts(
    backend: &StubBackend,
    tag: &str,
) -> (
    bizniz_client::ApiTransport,
    bizniz_client::EndpointResolver,
) {
    let cache_path = temp_cache_path(tag);
    let _ = std::fs::remove_file(&cache_path);
    client_parts_with_cache(backend, cache_path)
}

/// Same as [`client_parts`], but reusing an existing cache file - for tests
/// that assert the memoized endpoint survives a client restart.
#[must_use]
pub fn client_parts_with_cache(
    backend: &StubBackend,
    cache_path: PathBuf,
) -> (
    bizniz_client::ApiTransport,
    bizniz_client::EndpointResolver,
) {
    let config = bizniz_client::ClientConfig {
        base_url: backend
            .base_url()
            .parse()
            .expect("stub backend URL is valid"),
        endpoint_cache_path: cache_path.clone(),
    };
    let transport = bizniz_client::ApiTransport::new(&config);
    let resolver =
        bizniz_client::EndpointResolver::new(bizniz_client::EndpointCache::load(cache_path));
    (transport, resolver)
}

fn wrap_collection(style: EnvelopeStyle, records: Vec<Value>) -> Value {
    match style {
        EnvelopeStyle::Bare => Value::Array(records),
        EnvelopeStyle::Collection => json!({ "collection": records }),
        EnvelopeStyle::Data => json!({ "data": records }),
        EnvelopeStyle::DataCollection => json!({ "data": { "collection": records } }),
        EnvelopeStyle::ResultCollection => json!({ "result": { "collection": records } }),
        EnvelopeStyle::Unrecognized => json!({ "message": "service degraded", "items": records }),
    }
}

fn wrap_entity(style: EnvelopeStyle, entity: Value) -> Value {
    match style {
        EnvelopeStyle::Data | EnvelopeStyle::DataCollection => json!({ "data": entity }),
        EnvelopeStyle::ResultCollection => json!({ "result": entity }),
        _ => entity,
    }
}

fn log_request(state: &BackendState, method: &str, path: &str) {
    state
        .request_log
        .lock()
        .expect("request log lock")
        .push(format!("{method} {path}"));
}

async fn list_kind(state: &BackendState, kind: Kind) -> (StatusCode, Json<Value>) {
    if state.fail_lists.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "backend unavailable" })),
        );
    }

    let records = match kind {
        Kind::Company => state.companies.lock().expect("companies lock").clone(),
        Kind::Employee => state.employees.lock().expect("employees lock").clone(),
    };
    (StatusCode::OK, Json(wrap_collection(state.envelope, records)))
}

async fn list_companies(State(state): State<Arc<BackendState>>) -> (StatusCode, Json<Value>) {
    list_kind(&state, Kind::Company).await
}

async fn list_employees(State(state): State<Arc<BackendState>>) -> (StatusCode, Json<Value>) {
    list_kind(&state, Kind::Employee).await
}

/// Shared POST handler for every create candidate path. The path decides the
/// entity kind; the accepted list decides whether this backend version
/// actually serves it.
async fn create_entity(
    State(state): State<Arc<BackendState>>,
    uri: Uri,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    log_request(&state, "POST", &path);

    let (kind, accepted) = if COMPANY_CREATE_PATHS.contains(&path.as_str()) {
        (Kind::Company, &state.accepted_company_creates)
    } else {
        (Kind::Employee, &state.accepted_employee_creates)
    };

    if !accepted.contains(&path.as_str()) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Cannot POST {path}") })),
        );
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst).to_string();
    if let Some(map) = body.as_object_mut() {
        map.insert("_id".to_string(), Value::String(id));
    }

    match kind {
        Kind::Company => state.companies.lock().expect("companies lock").push(body.clone()),
        Kind::Employee => state.employees.lock().expect("employees lock").push(body.clone()),
    }

    (StatusCode::CREATED, Json(wrap_entity(state.envelope, body)))
}

fn update_kind(
    records: &Mutex<Vec<Value>>,
    id: &str,
    mut body: Value,
    style: EnvelopeStyle,
) -> (StatusCode, Json<Value>) {
    if let Some(map) = body.as_object_mut() {
        map.insert("_id".to_string(), Value::String(id.to_string()));
    }

    let mut records = records.lock().expect("records lock");
    match records.iter_mut().find(|r| r["_id"] == id) {
        Some(slot) => {
            *slot = body.clone();
            (StatusCode::OK, Json(wrap_entity(style, body)))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("No record with id {id}") })),
        ),
    }
}

fn delete_kind(records: &Mutex<Vec<Value>>, id: &str) -> (StatusCode, Json<Value>) {
    let mut records = records.lock().expect("records lock");
    match records.iter().position(|r| r["_id"] == id) {
        Some(index) => {
            records.remove(index);
            (StatusCode::OK, Json(json!({ "message": "deleted" })))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("No record with id {id}") })),
        ),
    }
}

async fn update_company(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    log_request(&state, "PUT", &format!("/api/companies/{id}"));

    // The real backend rejects an empty name; one error-path test relies on it.
    if body["name"].as_str() == Some("") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "name is required" })),
        );
    }

    update_kind(&state.companies, &id, body, state.envelope)
}

async fn delete_company(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    log_request(&state, "DELETE", &format!("/api/companies/{id}"));
    delete_kind(&state.companies, &id)
}

async fn update_employee(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    log_request(&state, "PUT", &format!("/api/employees/{id}"));
    update_kind(&state.employees, &id, body, state.envelope)
}

async fn delete_employee(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    log_request(&state, "DELETE", &format!("/api/employees/{id}"));
    delete_kind(&state.employees, &id)
}
