//! The per-resource endpoint set a CRUD facade talks to.

use std::future::Future;

use campus_core::api::{ApiError, ApiResponse};
use serde_json::Value;

/// Remote operations for one resource.
///
/// Implementations must not retry; the facade reports every failure as-is.
pub trait Endpoints: Send + Sync {
    fn get_all(&self) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn create(&self, payload: Value) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    /// Update the record identified by `payload["id"]`.
    fn update(&self, payload: Value) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// Id carried by an update payload, as a string.
///
/// Numeric ids are accepted and rendered in decimal.
#[must_use]
pub fn payload_id(payload: &Value) -> Option<String> {
    match payload.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
