//! Stateless HTTP request builder and response parser for the pickup API.
//!
//! # Design
//! `PickupClient` holds only immutable configuration (base URL, timeouts) and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. `PickupApi` glues the two halves to a
//! transport; tests can drive either half directly.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Created, EnvironmentalImpact, NewPickup, PickupId, PickupRequest, PickupUpdate};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the pickup API.
#[derive(Debug, Clone)]
pub struct PickupClient {
    config: ClientConfig,
}

impl PickupClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn from_config(mut config: ClientConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/pickups", self.config.base_url)
    }

    /// The id is percent-encoded so it always stays one path segment.
    fn item_url(&self, id: &PickupId) -> String {
        let id = id.to_string();
        format!("{}/pickups/{}", self.config.base_url, urlencoding::encode(&id))
    }

    fn request(&self, method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
            timeout: Some(self.config.request_timeout),
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        url: String,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(method, url);
        req.headers.push(("content-type".to_string(), JSON.to_string()));
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_list_pickups(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_pickup(&self, id: &PickupId) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_pickup(&self, input: &NewPickup) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_pickup(&self, id: &PickupId, input: &PickupUpdate) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_pickup(&self, id: &PickupId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id))
    }

    pub fn build_environmental_impact(&self) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            format!("{}/environmental-impact", self.config.base_url),
        )
    }

    /// Connectivity probe: a collection read with the shorter probe timeout.
    pub fn build_probe(&self) -> HttpRequest {
        let mut req = self.build_list_pickups();
        req.timeout = Some(self.config.probe_timeout);
        req
    }

    /// Any 2xx is accepted. An empty body is an empty collection, not a
    /// parse failure.
    pub fn parse_list_pickups(&self, response: HttpResponse) -> Result<Vec<PickupRequest>, ApiError> {
        check_success(&response)?;
        if response.is_empty() {
            return Ok(Vec::new());
        }
        decode(&response.body)
    }

    pub fn parse_get_pickup(&self, response: HttpResponse) -> Result<PickupRequest, ApiError> {
        check_success(&response)?;
        decode(&response.body)
    }

    /// Only 201 confirms a creation. A 201 whose body is empty, not JSON, or
    /// not a pickup record still yields success, as `Created::Acknowledged`.
    pub fn parse_create_pickup(&self, response: HttpResponse) -> Result<Created, ApiError> {
        check_status(&response, 201)?;
        if response.is_empty() {
            return Ok(Created::Acknowledged {
                message: "pickup created".to_string(),
            });
        }
        if let Ok(pickup) = serde_json::from_str::<PickupRequest>(&response.body) {
            return Ok(Created::Record(pickup));
        }
        let message = match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("pickup created")
                .to_string(),
            Err(_) => response.body.trim().to_string(),
        };
        Ok(Created::Acknowledged { message })
    }

    pub fn parse_update_pickup(&self, response: HttpResponse) -> Result<PickupRequest, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// 204 is the canonical success; 200 is treated the same and its body
    /// ignored.
    pub fn parse_delete_pickup(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status == 200 {
            return Ok(());
        }
        check_status(&response, 204)
    }

    pub fn parse_environmental_impact(&self, response: HttpResponse) -> Result<EnvironmentalImpact, ApiError> {
        check_success(&response)?;
        decode(&response.body)
    }

    /// Any HTTP response at all means the server is reachable.
    pub fn parse_probe(&self, response: HttpResponse) -> u16 {
        response.status
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(status_error(response))
}

/// Reads accept the whole 2xx range.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(status_error(response))
}

fn status_error(response: &HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    }
}
