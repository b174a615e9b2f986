//! Schema and field validation error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path to the offending field, e.g. `parents.0.phone`.
    /// Empty for errors on the form value itself.
    pub path: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// First path segment, i.e. the top-level field the error belongs to.
    #[must_use]
    pub fn root_field(&self) -> &str {
        self.path.split('.').next().unwrap_or_default()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A value failed validation. Terminal for that attempt; the caller must
/// supply corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Validation failed: {}", summarize(.field_errors))]
pub struct ValidationFailure {
    pub field_errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// The first error reported for `path`, if any.
    #[must_use]
    pub fn for_path(&self, path: &str) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.path == path)
    }

    /// Distinct top-level fields with at least one error, in report order.
    #[must_use]
    pub fn root_fields(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = Vec::new();
        for error in &self.field_errors {
            let root = error.root_field();
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from schema construction and the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// Schema generation or compilation error.
    #[error("Schema compilation error: {0}")]
    Compile(String),

    /// A value did not pass validation.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}
