//! In-process stand-in for the Vultr v1 API.
//!
//! Shared by the integration tests through:
//!
//! ```rust
//! #[path = "common/stub_server.rs"]
//! mod stub_server;
//! ```

#![allow(
    dead_code,
    reason = "each integration test binary uses a different subset"
)]

use std::collections::VecDeque;
use std::future::pending;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const API_KEY_HEADER: &str = "api-key";

/// Canned response served by [`StubHttpServer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StubResponse {
    /// Answer with a status code and body.
    Reply { status: u16, body: String },
    /// Accept the request and never answer.
    Stall,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Reply {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Reply {
            status,
            body: body.into(),
        }
    }
}

/// Request line and credential captured by [`StubHttpServer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query string.
    pub target: String,
    /// Value of the `API-Key` header, if sent.
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, Default)]
struct StubState {
    responses: Arc<Mutex<VecDeque<StubResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// HTTP server answering every route from a FIFO of [`StubResponse`]s.
///
/// Once the queue is exhausted every request receives a 500.
#[derive(Debug)]
pub struct StubHttpServer {
    base_url: String,
    state: StubState,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl StubHttpServer {
    /// Binds to an ephemeral localhost port and starts serving.
    pub async fn start(responses: Vec<StubResponse>) -> std::io::Result<Self> {
        let state = StubState {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::default(),
        };
        let router = Router::new().fallback(answer).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let shutdown = CancellationToken::new();
        let task = tokio::spawn({
            let signal = shutdown.child_token();
            async move {
                axum::serve(listener, router)
                    .with_graceful_shutdown(async move { signal.cancelled().await })
                    .await
                    .ok();
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}/v1"),
            state,
            shutdown,
            task,
        })
    }

    /// Base URL to configure clients with (ends in `/v1`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        locked(&self.state.requests).clone()
    }
}

impl Drop for StubHttpServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.task.abort();
    }
}

async fn answer(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    locked(&state.requests).push(RecordedRequest {
        method: method.to_string(),
        target: uri.to_string(),
        api_key: headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
    });

    let next = locked(&state.responses).pop_front();
    match next {
        Some(StubResponse::Reply { status, body }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Some(StubResponse::Stall) => pending().await,
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no stub response queued").into_response(),
    }
}
