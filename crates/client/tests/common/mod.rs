#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};
use tokio::time::Instant;

use groupings_client::{ApiRequest, ClientConfig, ClientError, Transport};

pub const GROUPING_PATH: &str = "tmp:testiwta:testiwta-aux";
pub const CURRENT_USER: &str = "testiwta";

pub fn identifiers() -> Vec<String> {
    vec!["testiwta".to_string(), "testiwtb".to_string()]
}

pub fn in_progress() -> Value {
    json!({"status": "IN_PROGRESS"})
}

pub fn completed() -> Value {
    json!({"status": "COMPLETED", "result": {"resultCode": "SUCCESS"}})
}

/// Stand-in for a rejected request; `ClientError` is not `Clone`.
pub fn unavailable() -> ClientError {
    ClientError::Api {
        status: 503,
        body: "unavailable".into(),
    }
}

// ---------------------------------------------------------------------------
// Scripted in-memory transport
// ---------------------------------------------------------------------------

/// Transport that replays queued responses and records every request with
/// the (possibly paused) tokio clock reading at the time it was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    calls: Mutex<Vec<(ApiRequest, Instant)>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, ClientError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    /// Requests against the job status endpoint.
    pub fn polls(&self) -> Vec<ApiRequest> {
        self.calls()
            .into_iter()
            .filter(|r| r.path.starts_with("/jobs/"))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push((request, Instant::now()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left"))
    }
}

// ---------------------------------------------------------------------------
// Mock HTTP server
// ---------------------------------------------------------------------------

/// A request as received by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
pub struct MockState {
    pub requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
}

impl MockState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, json!({"resultCode": "SUCCESS"}).to_string()));
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Start a mock API on an ephemeral port.
///
/// `responses` are served in order; once exhausted every request gets
/// `{"resultCode": "SUCCESS"}`.
pub async fn spawn_mock_api(responses: Vec<(StatusCode, Value)>) -> (SocketAddr, MockState) {
    let state = MockState {
        requests: Arc::default(),
        responses: Arc::new(Mutex::new(
            responses
                .into_iter()
                .map(|(status, body)| (status, body.to_string()))
                .collect(),
        )),
    };
    let app = Router::new().fallback(record).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

/// Client configuration pointing at the mock server with fast polling.
pub fn mock_config(addr: SocketAddr) -> ClientConfig {
    let mut config = ClientConfig::new(format!("http://{addr}"), CURRENT_USER);
    config.poll.interval = std::time::Duration::from_millis(10);
    config
}
