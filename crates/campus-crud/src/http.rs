//! REST endpoints over `reqwest`.
//!
//! Routes for resource `r` under the base URL:
//! `GET /r`, `GET /r/{id}`, `POST /r`, `PUT /r/{id}`, `DELETE /r/{id}`.

use std::time::Duration;

use campus_core::api::{ApiError, ApiResponse};
use serde_json::Value;

use crate::endpoints::{Endpoints, payload_id};
use crate::error::CrudError;

/// Endpoints for one backend resource.
#[derive(Debug, Clone)]
pub struct RestEndpoints {
    http: reqwest::Client,
    collection_url: String,
}

impl RestEndpoints {
    /// # Errors
    ///
    /// Returns `CrudError::InvalidBaseUrl` if `base_url` is not an http(s)
    /// URL, or `CrudError::Client` if the HTTP client fails to build.
    pub fn new(base_url: &str, resource: &str, timeout: Duration) -> Result<Self, CrudError> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CrudError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("campus/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            collection_url: format!("{base}/{}", resource.trim_matches('/')),
        })
    }

    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url, urlencoding::encode(id))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse, ApiError> {
        let resp = request.send().await.map_err(transport_error)?;
        let resp = check_response(resp).await?;
        decode(resp).await
    }
}

impl Endpoints for RestEndpoints {
    async fn get_all(&self) -> Result<ApiResponse, ApiError> {
        self.send(self.http.get(&self.collection_url)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.http.get(self.record_url(id))).await
    }

    async fn create(&self, payload: Value) -> Result<ApiResponse, ApiError> {
        self.send(self.http.post(&self.collection_url).json(&payload))
            .await
    }

    async fn update(&self, payload: Value) -> Result<ApiResponse, ApiError> {
        let id = payload_id(&payload)
            .ok_or_else(|| ApiError::new(0, "update payload has no id"))?;
        self.send(self.http.put(self.record_url(&id)).json(&payload))
            .await
    }

    async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.http.delete(self.record_url(id))).await
    }
}

/// Map a non-success status to an [`ApiError`] carrying the server message.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let mut error = ApiError::from_body(status.as_u16(), &body);
    if error.message.is_empty() {
        error.message = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }
    Err(error)
}

/// Parse a success body. An empty body is a success with no data.
async fn decode(resp: reqwest::Response) -> Result<ApiResponse, ApiError> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(transport_error)?;
    if body.trim().is_empty() {
        return Ok(ApiResponse::new(Value::Null, ""));
    }
    serde_json::from_str(&body)
        .map_err(|e| ApiError::new(status, format!("invalid response body: {e}")))
}

fn transport_error(error: reqwest::Error) -> ApiError {
    ApiError::new(error.status().map_or(0, |s| s.as_u16()), error.to_string())
}
