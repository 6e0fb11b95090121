//! The probe runner: one request, one classified result.

use crate::transport::{Method, ProbeRequest, RawResponse, Transport};
use serde_json::{Map, Value};
use tracing::debug;

/// Outcome of a single probe.
///
/// Never an error: transport failures come back as `status == 0` with
/// `error` set.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// HTTP status, or 0 if no response arrived.
    pub status: u16,
    /// True iff `status` is in `[200, 300)`.
    pub ok: bool,
    /// Parsed JSON body, raw text as a JSON string, or `{}` when empty.
    pub data: Value,
    /// Transport failure message.
    pub error: Option<String>,
}

impl ProbeResult {
    /// Classify a buffered response.
    pub fn from_response(response: RawResponse) -> Self {
        Self {
            status: response.status,
            ok: (200..300).contains(&response.status),
            data: parse_body(response.body),
            error: None,
        }
    }

    /// A request that never got a response.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            ok: false,
            data: Value::Object(Map::new()),
            error: Some(message.into()),
        }
    }

    /// Top-level field of an object body.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Top-level non-empty string field of an object body.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Length of an array body.
    pub fn array_len(&self) -> Option<usize> {
        self.data.as_array().map(Vec::len)
    }

    /// Short reason for a failed probe, for log lines.
    pub fn failure_reason(&self) -> String {
        if let Some(error) = &self.error {
            return format!("unreachable ({})", error);
        }
        match self.str_field("message").or_else(|| self.str_field("error")) {
            Some(message) => format!("HTTP {}: {}", self.status, message),
            None => format!("HTTP {}", self.status),
        }
    }
}

fn parse_body(body: String) -> Value {
    if body.trim().is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => Value::String(body),
    }
}

/// Issues probes against a fixed base URL through a [`Transport`].
pub struct Prober {
    transport: Box<dyn Transport>,
    base_url: String,
}

impl Prober {
    /// Create a prober. A trailing slash on `base_url` is dropped so paths
    /// can always start with `/`.
    pub fn new(base_url: &str, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the request a probe would send.
    ///
    /// A body passed with GET is dropped.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ProbeRequest {
        ProbeRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            body: body.filter(|_| method.carries_body()).cloned(),
            bearer: token.map(String::from),
        }
    }

    /// Send one request and classify the answer.
    pub fn probe(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ProbeResult {
        let request = self.request(method, path, body, token);
        debug!(method = %method, url = %request.url, auth = token.is_some(), "probe");

        match self.transport.send(&request) {
            Ok(response) => ProbeResult::from_response(response),
            Err(e) => {
                debug!(url = %request.url, error = %e, "transport failure");
                ProbeResult::unreachable(e.message())
            }
        }
    }
}
