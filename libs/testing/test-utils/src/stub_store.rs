//! HTTP stand-in for the graph/vector store.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// One request the stub received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    /// Parsed JSON body, or `Value::Null` if it was not JSON
    pub body: Value,
    pub api_key: Option<String>,
}

#[derive(Default)]
struct StubState {
    responses: Mutex<HashMap<String, (StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Mutex<Option<Duration>>,
}

/// Store stub on an ephemeral local port.
///
/// Every `POST /{operation}` is recorded and answered with the response
/// configured for that operation, or a 404 when none is. `GET /` answers 200
/// so readiness probes succeed. The server stops when the stub is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let store = StubStore::start().await;
/// store.respond("getUsers", 500, "Node not found");
///
/// let config = StoreConfig::new(store.endpoint(), Some(store.port()));
/// ```
pub struct StubStore {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubStore {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());

        let app = Router::new()
            .route("/", get(|| async { StatusCode::OK }))
            .route("/{operation}", post(handle_operation))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub store listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read stub store address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Stub store stopped: {}", e);
            }
        });

        tracing::debug!(%addr, "Stub store listening");
        Self {
            addr,
            state,
            handle,
        }
    }

    /// Endpoint without port, e.g. `http://127.0.0.1`
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr.ip())
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Answer `operation` with `status` and a raw body.
    pub fn respond(&self, operation: &str, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).expect("Invalid status code for stub store");
        self.state
            .responses
            .lock()
            .expect("stub store lock poisoned")
            .insert(operation.to_string(), (status, body.into()));
    }

    /// Answer `operation` with 200 and a JSON body.
    pub fn respond_json(&self, operation: &str, body: Value) {
        self.respond(operation, 200, body.to_string());
    }

    /// Hold every operation response for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().expect("stub store lock poisoned") = Some(delay);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("stub store lock poisoned")
            .clone()
    }
}

impl Drop for StubStore {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_operation(
    State(state): State<Arc<StubState>>,
    Path(operation): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state
        .requests
        .lock()
        .expect("stub store lock poisoned")
        .push(RecordedRequest {
            operation: operation.clone(),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            api_key: headers
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });

    let delay = *state.delay.lock().expect("stub store lock poisoned");
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let response = state
        .responses
        .lock()
        .expect("stub store lock poisoned")
        .get(&operation)
        .cloned();
    response.unwrap_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Couldn't find query '{}'", operation),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_and_replays() {
        let store = StubStore::start().await;
        store.respond_json("getUsers", json!({ "users": [] }));

        let url = format!("{}:{}/getUsers", store.endpoint(), store.port());
        let response = reqwest::Client::new()
            .post(&url)
            .header("x-api-key", "secret")
            .body("{}")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), r#"{"users":[]}"#);

        let requests = store.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].operation, "getUsers");
        assert_eq!(requests[0].body, json!({}));
        assert_eq!(requests[0].api_key.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_unconfigured_operation_is_404() {
        let store = StubStore::start().await;
        let url = format!("{}:{}/nope", store.endpoint(), store.port());
        let response = reqwest::Client::new().post(&url).send().await.unwrap();
        assert_eq!(response.status(), 404);
    }
}
