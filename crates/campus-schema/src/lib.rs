//! # campus-schema
//!
//! Form validation for Campus.
//!
//! This crate provides:
//! - `FormSchema`: a compiled JSON Schema that validates form values and
//!   reports per-field errors with dotted paths
//! - Step scoping (`FormSchema::scoped`) used by multi-step forms
//! - `SchemaRegistry`: named schemas for every entity form
//!
//! Entity types are defined in `campus-core` with `#[derive(JsonSchema)]` and
//! field constraints; this crate turns them into validators.

mod error;
mod form_schema;
mod registry;

pub use error::{FieldError, SchemaError, ValidationFailure};
pub use form_schema::{FormSchema, set_value_at, value_at};
pub use registry::SchemaRegistry;
