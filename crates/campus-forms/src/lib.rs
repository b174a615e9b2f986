//! # campus-forms
//!
//! Coordination of independently mounted forms.
//!
//! - [`FormGroup`]: owns a [`FormRegistry`] of submit invokers; forms register
//!   on mount (keeping a [`Registration`] guard) and the group drives all of
//!   them through one all-or-nothing [`FormGroup::submit_group`].
//! - [`Form`]: a single form's values, schema, and visible field errors.
//! - [`Wizard`]: a multi-step form built on a [`StepSequencer`], accumulating
//!   per-step data and validating the whole payload on the last step. Button
//!   state is published to a [`DialogShell`].
//!
//! All state is mutated between await points only; locks are never held
//! across an `.await`.

mod dialog;
mod error;
mod form;
mod group;
mod registry;
mod wizard;

pub use dialog::{
    ButtonAction, ButtonSpec, ButtonVariant, DialogRef, DialogShell, RecordingShell, ShellEvent,
    labels,
};
pub use error::{FormError, WizardError};
pub use form::{Form, SharedForm};
pub use group::{FormGroup, GroupSubmission, Registration};
pub use registry::{FormRegistry, SubmitFuture, SubmitInvoker};
pub use wizard::{StepDef, StepHeader, StepOutcome, StepSequencer, Wizard, WizardBuilder};
