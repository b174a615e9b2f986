//! Envelope types exchanged with the Campus backend.
//!
//! Every endpoint answers `{ data, message, success }`; failures carry the
//! server's message and the HTTP status.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::errors::CoreError;

const fn default_success() -> bool {
    true
}

/// Successful response body from any backend endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_success")]
    pub success: bool,
}

impl ApiResponse {
    /// Build a response carrying `data` and a user-facing `message`.
    #[must_use]
    pub fn new(data: Value, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }

    /// Decode `data` into a typed entity (or collection of entities).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if `data` does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        serde_json::from_value(self.data.clone()).map_err(|source| CoreError::Decode {
            entity: std::any::type_name::<T>(),
            source,
        })
    }
}

/// Failure reported by the network layer.
///
/// `status` is `0` when no HTTP response was received: transport failure, or a
/// request that could not be built.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("API error ({status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build from an error response body, preferring its `message` field.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| body.to_string());
        Self { status, message }
    }
}

/// Encode an entity into a request payload.
///
/// # Errors
///
/// Returns `CoreError::Encode` if serialization fails.
pub fn to_payload<T: Serialize>(entity: &T) -> Result<Value, CoreError> {
    serde_json::to_value(entity).map_err(|source| CoreError::Encode {
        entity: std::any::type_name::<T>(),
        source,
    })
}
