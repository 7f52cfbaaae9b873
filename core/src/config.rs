//! Client configuration: base URL and per-call timeouts.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub const BASE_URL_VAR: &str = "PICKUP_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "PICKUP_API_TIMEOUT_SECS";
pub const PROBE_TIMEOUT_VAR: &str = "PICKUP_API_PROBE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied to every API operation.
    pub request_timeout: Duration,
    /// Applied to the connectivity probe only.
    pub probe_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Read overrides from `PICKUP_API_URL`, `PICKUP_API_TIMEOUT_SECS` and
    /// `PICKUP_API_PROBE_TIMEOUT_SECS`; unset variables keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_VAR) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty { var: BASE_URL_VAR });
            }
            config.base_url = url.to_string();
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            config.request_timeout = parse_seconds(REQUEST_TIMEOUT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(PROBE_TIMEOUT_VAR) {
            config.probe_timeout = parse_seconds(PROBE_TIMEOUT_VAR, &raw)?;
        }
        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

fn parse_seconds(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds {
            var,
            value: raw.to_string(),
        }),
    }
}
