//! Blocking HTTP execution of `HttpRequest` values.
//!
//! # Design
//! `Transport` is the seam between the pure build/parse core and the network.
//! `UreqTransport` disables ureq's status-code-as-error behavior so 4xx/5xx
//! responses come back as data and `PickupClient` does all status
//! interpretation. Only failures with no response at all (DNS, connect,
//! timeout, broken connection mid-body) surface as `ApiError` here. Bodies
//! that are not UTF-8 are decoded lossily and left to the parsers.

use std::io;

use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a ureq agent. The agent is reused across calls, so
/// connections to the same host are pooled.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

/// Apply headers and the per-request timeout.
fn prepare<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.config().timeout_global(request.timeout).build()
}

fn transport_error(request: &HttpRequest, err: ureq::Error) -> ApiError {
    let detail = format!("{} {}: {err}", request.method, request.url);
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout(detail),
        ureq::Error::Io(ref e) if e.kind() == io::ErrorKind::TimedOut => ApiError::Timeout(detail),
        _ => ApiError::Transport(detail),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => prepare(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => prepare(self.agent.post(url), request).send(body.as_bytes()),
            (HttpMethod::Post, None) => prepare(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => prepare(self.agent.put(url), request).send(body.as_bytes()),
            (HttpMethod::Put, None) => prepare(self.agent.put(url), request).send_empty(),
        };
        let mut response = result.map_err(|e| transport_error(request, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        // Read raw bytes: a body that is not UTF-8 is a parse problem for
        // `PickupClient`, not a connection failure.
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| transport_error(request, e))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse { status, headers, body })
    }
}
