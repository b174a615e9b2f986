//! A single form: current values, schema, and visible field errors.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use campus_schema::{FieldError, FormSchema, ValidationFailure, set_value_at, value_at};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::error::FormError;
use crate::group::{FormGroup, Registration};

/// A form shared between its owner and the group that submits it.
pub type SharedForm = Arc<Mutex<Form>>;

type SubmitHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Form {
    id: String,
    schema: FormSchema,
    defaults: Value,
    values: Value,
    errors: Vec<FieldError>,
}

impl Form {
    /// Create a form seeded with `defaults` (`null` is treated as `{}`).
    #[must_use]
    pub fn new(id: impl Into<String>, schema: FormSchema, defaults: Value) -> Self {
        let defaults = if defaults.is_null() {
            Value::Object(Map::new())
        } else {
            defaults
        };
        Self {
            id: id.into(),
            schema,
            values: defaults.clone(),
            defaults,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub const fn values(&self) -> &Value {
        &self.values
    }

    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        value_at(&self.values, path)
    }

    /// Set one field by dotted path and clear errors shown for it.
    pub fn set_field(&mut self, path: &str, value: Value) {
        set_value_at(&mut self.values, path, value);
        self.errors
            .retain(|e| e.path != path && !e.path.starts_with(&format!("{path}.")));
    }

    /// Replace all values.
    pub fn set_values(&mut self, values: Value) {
        self.values = values;
    }

    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn field_error(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validate the current values, updating the visible field errors.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationFailure` when any field is invalid.
    pub fn validate(&mut self) -> Result<Value, ValidationFailure> {
        match self.schema.validate(&self.values) {
            Ok(value) => {
                self.errors.clear();
                Ok(value)
            }
            Err(failure) => {
                self.errors.clone_from(&failure.field_errors);
                Err(failure)
            }
        }
    }

    /// Restore default values and clear errors.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors.clear();
    }

    #[must_use]
    pub fn into_shared(self) -> SharedForm {
        Arc::new(Mutex::new(self))
    }

    /// Register `form` with `group`: group submission validates it.
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateForm` if the group rejects the form's id.
    pub fn attach(form: &SharedForm, group: &FormGroup) -> Result<Registration, FormError> {
        register(form, group, None)
    }

    /// Like [`Form::attach`], but once the form validates `on_submit` runs
    /// with the validated value. The form resolves with that value only after
    /// the handler succeeds; a failing handler rejects the whole group.
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateForm` if the group rejects the form's id.
    pub fn attach_with<F, Fut, E>(
        form: &SharedForm,
        group: &FormGroup,
        on_submit: F,
    ) -> Result<Registration, FormError>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display,
    {
        let handler: SubmitHandler = Arc::new(move |value| {
            on_submit(value)
                .map(|result| result.map_err(|e| e.to_string()))
                .boxed()
        });
        register(form, group, Some(handler))
    }
}

fn register(
    form: &SharedForm,
    group: &FormGroup,
    on_submit: Option<SubmitHandler>,
) -> Result<Registration, FormError> {
    let id = lock(form).id.clone();
    let form = Arc::clone(form);
    group.register_form(id, move || {
        let form = Arc::clone(&form);
        let on_submit = on_submit.clone();
        async move {
            let value = {
                let mut form = lock(&form);
                form.validate()?
            };
            if let Some(on_submit) = on_submit {
                on_submit(value.clone()).await.map_err(FormError::Submit)?;
            }
            Ok(value)
        }
    })
}

fn lock(form: &SharedForm) -> std::sync::MutexGuard<'_, Form> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}
