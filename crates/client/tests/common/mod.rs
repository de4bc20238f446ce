//! In-process mock of the expense backend.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tokio::sync::Notify;

#[derive(Clone, Debug)]
pub struct Record {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
    pub status: String,
    pub owner: String,
}

impl Record {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "amount": self.amount,
            "category": self.category,
            "description": self.description,
            "date": self.date,
            "status": self.status,
            "submittedBy": self.owner,
        })
    }
}

#[derive(Default)]
pub struct BackendState {
    pub records: Vec<Record>,
    pub requests: Vec<String>,
    pub next_id: u64,
    /// Every request answers 401.
    pub revoked: bool,
    /// List endpoints answer 500.
    pub fail_lists: bool,
    /// List endpoints send a record with a negative amount.
    pub corrupt_lists: bool,
    /// Appended verbatim to every list response.
    pub raw_records: Vec<Value>,
    /// The first list call waits on this before answering.
    pub gate: Option<Arc<Notify>>,
    list_calls: usize,
}

#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<BackendState>>,
}

struct Caller {
    id: &'static str,
    name: &'static str,
    admin: bool,
}

fn caller_for(headers: &HeaderMap) -> Option<Caller> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let sid = cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("sid="))?;
    match sid {
        "alice" => Some(Caller {
            id: "u1",
            name: "Alice",
            admin: false,
        }),
        "bob" => Some(Caller {
            id: "u2",
            name: "Bob",
            admin: false,
        }),
        "boss" => Some(Caller {
            id: "a1",
            name: "Boss",
            admin: true,
        }),
        _ => None,
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

impl Backend {
    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.inner.lock().unwrap()
    }

    pub fn seed(&self, id: &str, cents: i64, category: &str, date: &str, status: &str, owner: &str) {
        self.state().records.push(Record {
            id: id.to_string(),
            amount: cents as f64 / 100.0,
            category: category.to_string(),
            description: format!("{category} expense"),
            date: date.to_string(),
            status: status.to_string(),
            owner: owner.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub async fn wait_for_requests(&self, n: usize) {
        for _ in 0..200 {
            if self.state().requests.len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("backend did not receive {n} requests");
    }

    fn log(&self, line: String) {
        self.state().requests.push(line);
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<Caller, Response> {
        if self.state().revoked {
            return Err(error(StatusCode::UNAUTHORIZED, "Session expired"));
        }
        caller_for(headers).ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Not authenticated"))
    }

    async fn list(&self, filter: impl Fn(&Record) -> bool) -> Response {
        let (snapshot, gate, fail, corrupt) = {
            let mut state = self.state();
            state.list_calls += 1;
            let gate = if state.list_calls == 1 { state.gate.clone() } else { None };
            let snapshot: Vec<Value> = state
                .records
                .iter()
                .filter(|r| filter(r))
                .map(Record::to_json)
                .chain(state.raw_records.iter().cloned())
                .collect();
            (snapshot, gate, state.fail_lists, state.corrupt_lists)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        if fail {
            return error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
        }
        if corrupt {
            let mut bad = snapshot;
            bad.push(json!({
                "id": "broken", "amount": -4, "category": "Food",
                "description": "x", "date": "2024-01-01", "status": "PENDING"
            }));
            return Json(json!({ "expenses": bad })).into_response();
        }
        Json(json!({ "expenses": snapshot })).into_response()
    }
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.log("POST /auth/login".to_string());
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let (sid, user) = match (email, password) {
        ("alice@corp.test", "secret") => ("alice", json!({"id": "u1", "name": "Alice", "role": "EMPLOYEE"})),
        ("bob@corp.test", "secret") => ("bob", json!({"id": "u2", "name": "Bob", "role": "EMPLOYEE"})),
        ("boss@corp.test", "secret") => ("boss", json!({"id": "a1", "name": "Boss", "role": "ADMIN"})),
        _ => return error(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    };

    (
        [(header::SET_COOKIE, format!("sid={sid}; Path=/; HttpOnly"))],
        Json(json!({ "user": user })),
    )
        .into_response()
}

async fn list_mine(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.log("GET /expenses".to_string());
    let caller = match backend.authorize(&headers) {
        Ok(caller) => caller,
        Err(res) => return res,
    };
    backend.list(|r| r.owner == caller.name).await
}

async fn list_all(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.log("GET /expenses/all".to_string());
    let caller = match backend.authorize(&headers) {
        Ok(caller) => caller,
        Err(res) => return res,
    };
    if !caller.admin {
        return error(StatusCode::FORBIDDEN, "Admins only");
    }
    backend.list(|_| true).await
}

async fn create(State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    backend.log("POST /expenses".to_string());
    let caller = match backend.authorize(&headers) {
        Ok(caller) => caller,
        Err(res) => return res,
    };
    let mut state = backend.state();
    state.next_id += 1;
    let record = Record {
        id: format!("new-{}", state.next_id),
        amount: body["amount"].as_f64().unwrap_or_default(),
        category: body["category"].as_str().unwrap_or_default().to_string(),
        description: body["description"].as_str().unwrap_or_default().to_string(),
        date: format!("{}T00:00:00.000Z", body["date"].as_str().unwrap_or_default()),
        status: "PENDING".to_string(),
        owner: caller.name.to_string(),
    };
    state.records.push(record.clone());
    (StatusCode::CREATED, Json(record.to_json())).into_response()
}

async fn update(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.log(format!("PUT /expenses/{id}"));
    let caller = match backend.authorize(&headers) {
        Ok(caller) => caller,
        Err(res) => return res,
    };
    let mut state = backend.state();
    let Some(record) = state.records.iter_mut().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    };
    if record.owner != caller.name {
        return error(StatusCode::FORBIDDEN, "Not your expense");
    }
    if record.status != "PENDING" {
        return error(StatusCode::CONFLICT, "Only pending expenses can be edited");
    }
    record.amount = body["amount"].as_f64().unwrap_or_default();
    record.category = body["category"].as_str().unwrap_or_default().to_string();
    record.description = body["description"].as_str().unwrap_or_default().to_string();
    record.date = body["date"].as_str().unwrap_or_default().to_string();
    Json(json!({ "expense": record.to_json() })).into_response()
}

async fn remove(State(backend): State<Backend>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    backend.log(format!("DELETE /expenses/{id}"));
    let caller = match backend.authorize(&headers) {
        Ok(caller) => caller,
        Err(res) => return res,
    };
    let mut state = backend.state();
    let Some(pos) = state.records.iter().position(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    };
    if state.records[pos].owner != caller.name {
        return error(StatusCode::FORBIDDEN, "Not your expense");
    }
    if state.records[pos].status != "PENDING" {
        return error(StatusCode::CONFLICT, "Only pending expenses can be deleted");
    }
    state.records.remove(pos);
    StatusCode::NO_CONTENT.into_response()
}

async fn set_status(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.log(format!("POST /expenses/{id}/status"));
    let caller = match backend.authorize(&headers) {
        Ok(caller) => caller,
        Err(res) => return res,
    };
    if !caller.admin {
        return error(StatusCode::FORBIDDEN, "Admins only");
    }
    let status = body["status"].as_str().unwrap_or_default().to_string();
    if status != "APPROVED" && status != "REJECTED" {
        return error(StatusCode::BAD_REQUEST, "Invalid status");
    }
    let mut state = backend.state();
    let Some(record) = state.records.iter_mut().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Expense not found");
    };
    if record.status != "PENDING" {
        return error(StatusCode::CONFLICT, "Expense already reviewed");
    }
    record.status = status;
    Json(record.to_json()).into_response()
}

fn router(backend: Backend) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/expenses", get(list_mine).post(create))
        .route("/expenses/all", get(list_all))
        .route("/expenses/{id}", put(update).delete(remove))
        .route("/expenses/{id}/status", post(set_status))
        .with_state(backend)
}

/// Starts the mock on an ephemeral port and returns its base URL.
pub async fn spawn_backend() -> (Backend, String) {
    let backend = Backend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, format!("http://{addr}"))
}

/// Per-test session file under `target/`.
pub fn state_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/test_sessions")
        .join(format!("{name}-{}.json", std::process::id()))
}
