//! CRUD client error types.

use thiserror::Error;

/// Errors raised while setting up an endpoint client.
///
/// Request failures are not reported here: every endpoint call resolves to a
/// `campus_core::api::ApiError` carrying the server message.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The configured base URL is unusable.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// A facade needs at least one cache namespace.
    #[error("at least one cache namespace is required")]
    NoNamespaces,
}
