//! The seam between the probe runner and the network.
//!
//! A [`Transport`] turns one [`ProbeRequest`] into one [`RawResponse`]. The
//! production implementation is [`HttpTransport`]; tests hand the runner a
//! closure instead.

use crate::error::{DeskprobeError, Result};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// HTTP methods the tracker API is probed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
}

impl Method {
    /// Uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }

    /// Whether a JSON body is sent with this method.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// JSON body. Only ever set for POST and PUT.
    pub body: Option<Value>,
    /// Bearer token for the Authorization header.
    pub bearer: Option<String>,
}

impl ProbeRequest {
    /// Headers implied by the body and token.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(2);
        if self.body.is_some() {
            headers.push(("Content-Type", "application/json".to_string()));
        }
        if let Some(token) = &self.bearer {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        headers
    }
}

/// Status and fully buffered body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body as text.
    pub body: String,
}

impl RawResponse {
    /// Response with a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// Response with a plain text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The request never produced a response (refused, DNS, timeout, bad URL).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sends one request and buffers the whole response.
pub trait Transport {
    /// Perform the exchange.
    fn send(&self, request: &ProbeRequest) -> std::result::Result<RawResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&ProbeRequest) -> std::result::Result<RawResponse, TransportError>,
{
    fn send(&self, request: &ProbeRequest) -> std::result::Result<RawResponse, TransportError> {
        self(request)
    }
}

/// Blocking HTTP transport backed by reqwest.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport. `None` disables the client-side timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeskprobeError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ProbeRequest) -> std::result::Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| transport_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| transport_error(&e))?;
        debug!(status, bytes = body.len(), url = %request.url, "response buffered");

        Ok(RawResponse { status, body })
    }
}

/// Flatten an error and its sources into one line.
fn transport_error(err: &(dyn StdError + 'static)) -> TransportError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TransportError::new(message)
}
