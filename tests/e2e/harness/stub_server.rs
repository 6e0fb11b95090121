use anyhow::{anyhow, Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

/// A request as the stub saw it on the wire.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names lowercased, in arrival order, duplicates kept.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    /// First value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// How many times a header was sent.
    pub fn header_count(&self, name: &str) -> usize {
        self.headers.iter().filter(|(k, _)| k == name).count()
    }
}

#[derive(Default)]
struct StubState {
    responses: Mutex<VecDeque<(u16, &'static str)>>,
    captured: Mutex<Vec<CapturedRequest>>,
}

/// Loopback axum server answering requests with canned responses in order.
///
/// The server runs on its own tokio runtime so the blocking reqwest client
/// can be driven from the test thread.
pub struct StubServer {
    runtime: Runtime,
    base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Serve `responses` in order. Requests beyond them get a 500.
    pub fn start(responses: Vec<(u16, &'static str)>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("build stub runtime")?;

        let state = Arc::new(StubState {
            responses: Mutex::new(responses.into()),
            captured: Mutex::default(),
        });
        let router = Router::new().fallback(capture).with_state(state.clone());

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .context("bind to ephemeral port")?;
        let addr = listener.local_addr()?;

        runtime.spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            runtime,
            base_url: format!("http://{addr}/api"),
            state,
        })
    }

    /// Base URL with the `/api` prefix the tracker uses.
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Stop the server and return what it received.
    pub fn finish(self) -> Result<Vec<CapturedRequest>> {
        self.runtime.shutdown_background();
        let captured = self
            .state
            .captured
            .lock()
            .map_err(|_| anyhow!("capture lock poisoned"))?;
        Ok(captured.clone())
    }
}

async fn capture(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let request = CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).to_string(),
    };
    if let Ok(mut captured) = state.captured.lock() {
        captured.push(request);
    }

    let next = state
        .responses
        .lock()
        .ok()
        .and_then(|mut responses| responses.pop_front());
    match next {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        ),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no canned response left"),
    }
}

/// A port nothing listens on.
pub fn closed_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}
