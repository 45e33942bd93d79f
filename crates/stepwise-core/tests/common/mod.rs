//! Stand-in upstream for client tests
//!
//! Serves a canned chat completion reply on `127.0.0.1:0` and records every
//! request it receives.

use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A request seen by the stand-in upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    reply: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    /// Start a server answering every completion call with `status` and `reply`
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        Self::start_raw(status, reply.to_string()).await
    }

    /// Same as [`MockUpstream::start`] but the reply body is sent verbatim
    pub async fn start_raw(status: StatusCode, reply: impl Into<String>) -> Self {
        let reply = reply.into();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            status,
            reply,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Mock upstream has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            requests,
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

async fn completions(
    State(state): State<UpstreamState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .await
        .push(RecordedRequest { authorization, body });

    (
        state.status,
        [(CONTENT_TYPE, "application/json")],
        state.reply.clone(),
    )
}

/// A completion reply whose function call carries `arguments`
pub fn function_call_reply(arguments: &Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {
                "role": "assistant",
                "content": null,
                "function_call": {
                    "name": "analyze_problem",
                    "arguments": arguments.to_string()
                }
            }
        }]
    })
}

/// The two-step breakdown used across tests
pub fn setup_and_build_arguments() -> Value {
    json!({
        "steps": [
            { "id": "step1", "title": "Setup", "description": "Initial setup", "dependencies": [] },
            { "id": "step2", "title": "Build", "description": "Build project", "dependencies": ["step1"] }
        ],
        "summary": "Test summary"
    })
}
