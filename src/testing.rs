//! Scriptable stand-in for the remote store, served over real HTTP.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::Config;
use crate::models::{Record, RecordId};
use crate::store::RecordStore;

/// One request as the stub received it.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Default)]
struct StubState {
    records: Vec<Record>,
    calls: Vec<Call>,
    next_id: u64,
    fail_with: Option<StatusCode>,
    raw_body: Option<String>,
    delay: Option<Duration>,
}

type Shared = Arc<Mutex<StubState>>;

pub struct StubStore {
    state: Shared,
    base_url: String,
}

impl StubStore {
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::new(&Config::with_base_url(&self.base_url)).unwrap()
    }

    pub fn seed(&self, records: Vec<Record>) {
        self.state.lock().unwrap().records = records;
    }

    /// Answer every request with `status` and an empty body.
    pub fn fail_with(&self, status: StatusCode) {
        self.state.lock().unwrap().fail_with = Some(status);
    }

    /// Answer every request with `200` and `body` verbatim.
    pub fn respond_with_body(&self, body: &str) {
        self.state.lock().unwrap().raw_body = Some(body.to_string());
    }

    /// Hold every response for `delay`.
    pub fn delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.lock().unwrap().records.clone()
    }
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload: Option<serde_json::Value> = serde_json::from_slice(&body).ok();
    let delay = {
        let mut state = state.lock().unwrap();
        state.calls.push(Call {
            method: method.to_string(),
            path: uri.path().to_string(),
            content_type: headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: payload.clone(),
        });
        state.delay
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut state = state.lock().unwrap();
    if let Some(status) = state.fail_with {
        return status.into_response();
    }
    if let Some(raw) = &state.raw_body {
        return json(StatusCode::OK, raw.clone());
    }

    let segments: Vec<&str> = uri
        .path()
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let id = segments.get(1).map(|raw| {
        RecordId::from(
            urlencoding::decode(raw)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.to_string()),
        )
    });

    match (method, segments.first().copied(), id) {
        (Method::GET, Some("record"), None) => {
            json(StatusCode::OK, to_json(&state.records))
        }
        (Method::GET, Some("record"), Some(id)) => {
            match state.records.iter().find(|r| r.id.as_ref() == Some(&id)) {
                Some(record) => json(StatusCode::OK, to_json(record)),
                None => json(StatusCode::OK, String::new()),
            }
        }
        (Method::POST, Some("record"), None) => {
            let Some(mut record) = payload.and_then(|v| serde_json::from_value::<Record>(v).ok())
            else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            state.next_id += 1;
            record.id = Some(RecordId::new(format!("stub-{}", state.next_id)));
            state.records.push(record.clone());
            json(StatusCode::CREATED, to_json(&record))
        }
        (Method::PATCH, Some("record"), Some(id)) => {
            let Some(update) = payload.and_then(|v| serde_json::from_value::<Record>(v).ok())
            else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            match state.records.iter_mut().find(|r| r.id.as_ref() == Some(&id)) {
                Some(record) => {
                    record.name = update.name;
                    record.position = update.position;
                    record.level = update.level;
                    StatusCode::OK.into_response()
                }
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
        (Method::DELETE, Some("record"), Some(id)) => {
            let before = state.records.len();
            state.records.retain(|r| r.id.as_ref() != Some(&id));
            if state.records.len() < before {
                StatusCode::OK.into_response()
            } else {
                StatusCode::NOT_FOUND.into_response()
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap()
}

fn json(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
