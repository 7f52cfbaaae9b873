//! One-call-per-operation facade over `PickupClient` and a `Transport`.
//!
//! Every method performs exactly one round-trip: build the request, execute
//! it, parse the response. No retries, no caching. Failures come back as
//! `ApiError` values and are logged at `warn`.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::client::PickupClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    Created, EnvironmentalImpact, NewPickup, PickupId, PickupRequest, PickupUpdate, WasteType,
};

#[derive(Debug, Clone)]
pub struct PickupApi<T = UreqTransport> {
    client: PickupClient,
    transport: T,
}

impl PickupApi<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> PickupApi<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: PickupClient::from_config(config),
            transport,
        }
    }

    pub fn client(&self) -> &PickupClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    pub fn list_pickups(&self) -> Result<Vec<PickupRequest>, ApiError> {
        let result = self
            .send(self.client.build_list_pickups())
            .and_then(|resp| self.client.parse_list_pickups(resp));
        logged("list pickups", result)
    }

    /// A missing record is reported as `ApiError::NotFound`.
    pub fn get_pickup(&self, id: &PickupId) -> Result<PickupRequest, ApiError> {
        let result = self
            .send(self.client.build_get_pickup(id))
            .and_then(|resp| self.client.parse_get_pickup(resp));
        logged("get pickup", result)
    }

    /// Create a pickup for `user_name`. The new record starts pending.
    pub fn create_pickup(
        &self,
        waste_type: impl Into<WasteType>,
        pickup_location: &str,
        pickup_date_time: NaiveDateTime,
        user_name: &str,
    ) -> Result<Created, ApiError> {
        let input = NewPickup::new(waste_type, pickup_location, pickup_date_time, user_name);
        self.submit_pickup(&input)
    }

    pub fn submit_pickup(&self, input: &NewPickup) -> Result<Created, ApiError> {
        let result = self
            .client
            .build_create_pickup(input)
            .and_then(|req| self.send(req))
            .and_then(|resp| self.client.parse_create_pickup(resp));
        logged("create pickup", result)
    }

    /// Replace the whole record. Status transitions are not checked here.
    pub fn update_pickup(&self, id: &PickupId, input: &PickupUpdate) -> Result<PickupRequest, ApiError> {
        let result = self
            .client
            .build_update_pickup(id, input)
            .and_then(|req| self.send(req))
            .and_then(|resp| self.client.parse_update_pickup(resp));
        logged("update pickup", result)
    }

    pub fn delete_pickup(&self, id: &PickupId) -> Result<(), ApiError> {
        let result = self
            .send(self.client.build_delete_pickup(id))
            .and_then(|resp| self.client.parse_delete_pickup(resp));
        logged("delete pickup", result)
    }

    pub fn environmental_impact(&self) -> Result<EnvironmentalImpact, ApiError> {
        let result = self
            .send(self.client.build_environmental_impact())
            .and_then(|resp| self.client.parse_environmental_impact(resp));
        logged("fetch environmental impact", result)
    }

    /// Returns the status the server answered with; only transport failures
    /// are errors.
    pub fn check_connection(&self) -> Result<u16, ApiError> {
        let result = self
            .send(self.client.build_probe())
            .map(|resp| self.client.parse_probe(resp));
        logged("connectivity probe", result)
    }
}

fn logged<R>(operation: &str, result: Result<R, ApiError>) -> Result<R, ApiError> {
    if let Err(err) = &result {
        warn!("{operation} failed: {err}");
    }
    result
}
