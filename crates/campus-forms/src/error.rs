//! Form and wizard error types.

use campus_schema::{SchemaError, ValidationFailure};
use thiserror::Error;

/// Errors from single forms and form groups.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form's field validation failed.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    /// A form registered under an id that is already taken while the group
    /// rejects duplicates.
    #[error("Form '{0}' is already registered")]
    DuplicateForm(String),

    /// The form's submit handler failed after validation.
    #[error("Form submission failed: {0}")]
    Submit(String),

    /// One or more forms of a group failed. Lists every failing form in
    /// registration order; no partial result is produced.
    #[error("{} form(s) failed: {}", .errors.len(), failing_ids(.errors))]
    Group { errors: Vec<(String, FormError)> },
}

impl FormError {
    /// For a group failure, the error reported by form `id`.
    #[must_use]
    pub fn for_form(&self, id: &str) -> Option<&Self> {
        match self {
            Self::Group { errors } => errors.iter().find(|(f, _)| f == id).map(|(_, e)| e),
            _ => None,
        }
    }
}

fn failing_ids(errors: &[(String, FormError)]) -> String {
    errors
        .iter()
        .map(|(id, _)| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from the multi-step wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// A wizard needs at least one step.
    #[error("A wizard needs at least one step")]
    NoSteps,

    /// The current step's form failed validation; the wizard stays on it.
    #[error("Step {step} failed validation: {failure}")]
    Step {
        step: usize,
        failure: ValidationFailure,
    },

    /// The accumulated data failed the wizard schema on the last step.
    /// `steps` lists the step numbers owning the failing fields.
    #[error("Submitted data failed validation (steps {steps:?}): {failure}")]
    Validation {
        failure: ValidationFailure,
        steps: Vec<usize>,
    },

    /// The external submit callback failed.
    #[error("Submit handler failed: {0}")]
    Submit(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
