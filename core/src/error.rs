//! Error types for the pickup API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! pickup does not exist" from "the server returned an unexpected status."
//! All other unexpected statuses land in `HttpError` with the raw status code
//! and body. Transport failures are split into `Timeout` and `Transport` so a
//! front end can suggest retrying later versus checking the URL.

use thiserror::Error;

/// Errors returned by `PickupClient` parse methods and `PickupApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested pickup does not exist.
    #[error("pickup not found")]
    NotFound,

    /// The server returned a status other than the expected one (and not 404).
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request did not complete before its timeout expired.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// DNS, connect, or I/O failure before a response was received.
    #[error("connection error: {0}")]
    Transport(String),
}

impl ApiError {
    /// True for failures where no HTTP response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Timeout(_) | ApiError::Transport(_))
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while reading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
