//! In-process mock of the Roster REST API for integration tests.
//!
//! [`MockApiServer`] binds `127.0.0.1:0` and serves the four resource
//! collections plus `POST /authenticate` from an in-memory store, so clients
//! and screens can be exercised end to end without a real backend.
//!
//! # Features
//!
//! - **Seeding**: insert records directly with [`MockApiServer::seed`]
//! - **Users**: register credentials; login issues `mock-token-<username>`
//! - **Auth enforcement**: [`MockApiServer::require_token`] answers 403 to
//!   requests without a known bearer
//! - **Failure injection**: [`MockApiServer::fail_next`] answers the next
//!   request with a fixed status
//! - **Request log**: every request is recorded before routing
//!
//! # Example
//!
//! ```no_run
//! use roster_client::mock::MockApiServer;
//! use roster_core::ResourceKind;
//!
//! let server = MockApiServer::start().unwrap();
//! server.seed(ResourceKind::Departments, "Sales");
//! assert!(server.base_url().starts_with("http://127.0.0.1:"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use roster_core::{EntityId, ResourceKind};
use serde_json::{Value, json};

type StartError = Box<dyn std::error::Error + Send + Sync>;

/// One request as the mock received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of `key` in the query string, if present.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .as_deref()?
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

#[derive(Default)]
struct MockState {
    records: HashMap<ResourceKind, BTreeMap<i64, Value>>,
    next_id: i64,
    users: HashMap<String, String>,
    require_token: bool,
    fail_next: Option<u16>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn table(&mut self, kind: ResourceKind) -> &mut BTreeMap<i64, Value> {
        self.records.entry(kind).or_default()
    }

    fn valid_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.users.keys().map(|user| issued_token(user))
    }

    /// Resolve `{"id": n}` in `body[field]` to the full referenced record.
    fn embed_reference(&self, kind: ResourceKind, body: &mut Value) {
        let (Some(field), Some(target)) = (kind.reference_field(), kind.reference()) else {
            return;
        };
        let resolved = body
            .get(field)
            .and_then(|reference| reference.get("id"))
            .and_then(Value::as_i64)
            .and_then(|id| self.records.get(&target)?.get(&id).cloned());
        if let Some(object) = body.as_object_mut() {
            object.insert(field.to_string(), resolved.unwrap_or(Value::Null));
        }
    }
}

/// Token the mock issues for `username`.
#[must_use]
pub fn issued_token(username: &str) -> String {
    format!("mock-token-{username}")
}

/// A running mock API. Stops serving when dropped.
pub struct MockApiServer {
    server: Arc<tiny_http::Server>,
    state: Arc<Mutex<MockState>>,
    base_url: String,
    worker: Option<JoinHandle<()>>,
}

impl MockApiServer {
    /// Bind an ephemeral port and start serving on a background thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub fn start() -> Result<Self, StartError> {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0")?);
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or("mock server is not bound to a TCP address")?;
        let state = Arc::new(Mutex::new(MockState::default()));

        let worker = {
            let server = Arc::clone(&server);
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle(&state, request);
                }
            })
        };

        Ok(Self {
            server,
            state,
            base_url: format!("http://{addr}"),
            worker: Some(worker),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Insert a name-only record and return its id.
    pub fn seed(&self, kind: ResourceKind, name: &str) -> EntityId {
        self.insert(kind, json!({ "name": name }))
    }

    /// Insert a record pointing at `reference` (a department for employees, a
    /// course for students).
    pub fn seed_with_reference(
        &self,
        kind: ResourceKind,
        name: &str,
        reference: EntityId,
    ) -> EntityId {
        let mut body = json!({ "name": name });
        if let Some(field) = kind.reference_field() {
            body[field] = json!({ "id": reference.get() });
        }
        self.insert(kind, body)
    }

    fn insert(&self, kind: ResourceKind, mut body: Value) -> EntityId {
        let mut state = self.lock();
        let id = state.allocate_id();
        body["id"] = json!(id);
        state.embed_reference(kind, &mut body);
        state.table(kind).insert(id, body);
        EntityId::new(id)
    }

    /// Accept `username`/`password` at `POST /authenticate`.
    pub fn add_user(&self, username: &str, password: &str) {
        self.lock()
            .users
            .insert(username.to_string(), password.to_string());
    }

    /// Answer 403 to resource requests whose bearer was not issued by this
    /// mock.
    pub fn require_token(&self, required: bool) {
        self.lock().require_token = required;
    }

    /// Answer the next request (of any kind) with `status` and an error body.
    pub fn fail_next(&self, status: u16) {
        self.lock().fail_next = Some(status);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Stored records of `kind` in id order, as the server would serialize
    /// them.
    #[must_use]
    pub fn records(&self, kind: ResourceKind) -> Vec<Value> {
        self.lock()
            .records
            .get(&kind)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

struct Reply {
    status: u16,
    body: Option<Value>,
}

impl Reply {
    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }
}

fn handle(state: &Mutex<MockState>, mut request: tiny_http::Request) {
    let mut raw = String::new();
    let _ = request.as_reader().read_to_string(&mut raw);

    let (path, query) = match request.url().split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (request.url().to_string(), None),
    };
    let recorded = RecordedRequest {
        method: request.method().to_string().to_ascii_uppercase(),
        path,
        query,
        authorization: request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Authorization"))
            .map(|header| header.value.to_string()),
        body: serde_json::from_str(&raw).ok(),
    };

    let reply = {
        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        state.requests.push(recorded.clone());
        route(&mut state, &recorded)
    };

    let payload = reply
        .body
        .map(|body| body.to_string().into_bytes())
        .unwrap_or_default();
    let mut response = tiny_http::Response::from_data(payload).with_status_code(reply.status);
    if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", "application/json") {
        response = response.with_header(header);
    }
    let _ = request.respond(response);
}

fn route(state: &mut MockState, request: &RecordedRequest) -> Reply {
    if let Some(status) = state.fail_next.take() {
        return Reply::error(status, "injected failure");
    }

    let segments: Vec<&str> = request
        .path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        ["authenticate"] if request.method == "POST" => authenticate(state, request),
        ["api", collection, rest @ ..] if rest.len() <= 1 => {
            let Ok(kind) = collection.parse::<ResourceKind>() else {
                return Reply::error(404, "unknown collection");
            };
            if state.require_token && !authorized(state, request) {
                return Reply::error(403, "forbidden");
            }
            match rest.first() {
                None => collection_request(state, kind, request),
                Some(id) => match id.parse::<i64>() {
                    Ok(id) => item_request(state, kind, id, request),
                    Err(_) => Reply::error(400, "invalid id"),
                },
            }
        }
        _ => Reply::error(404, "not found"),
    }
}

fn authorized(state: &MockState, request: &RecordedRequest) -> bool {
    let Some(token) = request
        .authorization
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "))
    else {
        return false;
    };
    state.valid_tokens().any(|valid| valid == token)
}

fn authenticate(state: &MockState, request: &RecordedRequest) -> Reply {
    let field = |name: &str| {
        request
            .body
            .as_ref()
            .and_then(|body| body.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match (field("username"), field("password")) {
        (Some(username), Some(password))
            if state.users.get(&username).is_some_and(|known| *known == password) =>
        {
            Reply::json(200, json!({ "token": issued_token(&username) }))
        }
        _ => Reply::error(401, "bad credentials"),
    }
}

fn collection_request(state: &mut MockState, kind: ResourceKind, request: &RecordedRequest) -> Reply {
    match request.method.as_str() {
        "GET" => {
            let page = request
                .query_param("page")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            let size = request
                .query_param("size")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(20);
            if size == 0 {
                return Reply::error(400, "size must be positive");
            }
            let table = state.table(kind);
            let total = table.len();
            let content: Vec<Value> = table
                .values()
                .skip(page.saturating_mul(size))
                .take(size)
                .cloned()
                .collect();
            Reply::json(
                200,
                json!({
                    "content": content,
                    "totalPages": total.div_ceil(size).max(1),
                    "totalElements": total,
                    "number": page,
                    "size": size,
                }),
            )
        }
        "POST" => {
            let Some(mut body) = request.body.clone().filter(Value::is_object) else {
                return Reply::error(400, "expected a JSON object");
            };
            let id = state.allocate_id();
            body["id"] = json!(id);
            state.embed_reference(kind, &mut body);
            state.table(kind).insert(id, body.clone());
            Reply::json(201, body)
        }
        _ => Reply::error(405, "method not allowed"),
    }
}

fn item_request(
    state: &mut MockState,
    kind: ResourceKind,
    id: i64,
    request: &RecordedRequest,
) -> Reply {
    match request.method.as_str() {
        "GET" => match state.table(kind).get(&id) {
            Some(record) => Reply::json(200, record.clone()),
            None => Reply::error(404, "not found"),
        },
        "PUT" => {
            if !state.table(kind).contains_key(&id) {
                return Reply::error(404, "not found");
            }
            let Some(mut body) = request.body.clone().filter(Value::is_object) else {
                return Reply::error(400, "expected a JSON object");
            };
            body["id"] = json!(id);
            state.embed_reference(kind, &mut body);
            state.table(kind).insert(id, body.clone());
            Reply::json(200, body)
        }
        "DELETE" => match state.table(kind).remove(&id) {
            Some(_) => Reply::empty(204),
            None => Reply::error(404, "not found"),
        },
        _ => Reply::error(405, "method not allowed"),
    }
}
