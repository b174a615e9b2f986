//! Central registry of form schemas.
//!
//! The `SchemaRegistry` builds a `FormSchema` for every entity form at
//! construction time using [`schemars::schema_for!`] and validates values by
//! schema name.

use std::collections::HashMap;

use campus_core::entities::{
    Class, FeeType, FullStudent, Parent, ParentsForm, Role, Section, Settings, Student, Subject,
    Vehicle,
};
use serde_json::Value;

use crate::error::SchemaError;
use crate::form_schema::FormSchema;

/// Named schemas for every entity form.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, FormSchema>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, FormSchema::from_type::<$ty>()?);
    };
}

impl SchemaRegistry {
    /// Build a registry containing every entity and aggregate form schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if any generated schema fails to compile.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::new();

        // --- Single-record forms ---
        register!(schemas, "role", Role);
        register!(schemas, "class", Class);
        register!(schemas, "section", Section);
        register!(schemas, "subject", Subject);
        register!(schemas, "fee_type", FeeType);
        register!(schemas, "vehicle", Vehicle);
        register!(schemas, "parent", Parent);
        register!(schemas, "student", Student);
        register!(schemas, "settings", Settings);

        // --- Bulk and multi-step forms ---
        register!(schemas, "parents", ParentsForm);
        register!(schemas, "full_student", FullStudent);

        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FormSchema> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema, returning it with
    /// defaults applied.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::Validation` if validation produces field errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<Value, SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;
        Ok(schema.validate(instance)?)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
