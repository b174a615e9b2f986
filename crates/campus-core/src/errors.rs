//! Cross-cutting error types for Campus.
//!
//! Domain-specific errors (`SchemaError`, `FormError`, `CrudError`) live in
//! their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Campus crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payload could not be decoded into the requested entity type.
    #[error("Failed to decode {entity}: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An entity could not be encoded into a request payload.
    #[error("Failed to encode {entity}: {source}")]
    Encode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
