//! `{success, data | error}` envelope for handing results to callers that
//! want a uniform serializable shape instead of a `Result`.

use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success { success: True, data: T },
    Failure { success: False, error: String },
}

/// Serializes as `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct True;

/// Serializes as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct False;

impl Serialize for True {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl Serialize for False {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(false)
    }
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Outcome::Success { success: True, data }
    }

    pub fn failure(error: impl ToString) -> Self {
        Outcome::Failure {
            success: False,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl<T> From<Result<T, ApiError>> for Outcome<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(err) => Outcome::failure(err),
        }
    }
}
