//! Synchronous API client core for the waste pickup service.
//!
//! # Overview
//! `PickupClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network. `PickupApi` pairs it with a
//! `Transport` (by default the blocking `UreqTransport`) so each application
//! operation becomes exactly one HTTP round-trip whose outcome is a
//! `Result<_, ApiError>`.
//!
//! # Design
//! - `PickupClient` is stateless: it holds only base URL and timeouts.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and every status/body rule is unit-testable.
//! - `PickupRequest` is the one canonical record; lenient inbound decoding
//!   absorbs the legacy snake_case schema and status vocabulary.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod outcome;
pub mod query;
pub mod status;
pub mod transport;
pub mod types;

pub use api::PickupApi;
pub use client::PickupClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use outcome::Outcome;
pub use query::{PickupFilter, PickupSummary};
pub use status::{PickupStatus, TransitionError, UnknownStatus};
pub use transport::{Transport, UreqTransport};
pub use types::{
    format_pickup_datetime, parse_pickup_datetime, Created, EnvironmentalImpact, NewPickup, PickupId,
    PickupRequest, PickupUpdate, WasteType,
};
