//! Multi-step form wizard.
//!
//! ```text
//! AtStep(1) ──next──▶ AtStep(2) ──next──▶ … ──▶ AtStep(n) ──submit──▶ onSubmit(data)
//!     ▲                   │                          │
//!     └──────previous─────┘◀─────────previous────────┘
//! any ──reset/cancel──▶ AtStep(1), form data cleared
//! ```
//!
//! Each step edits one slice of the accumulated data: the slice under the
//! step's key, or the top level for steps without a key. The step form is
//! validated against the matching sub-schema; the whole payload is validated
//! against the wizard schema only when the last step is submitted.

use std::future::Future;
use std::sync::Arc;

use campus_schema::{FormSchema, ValidationFailure};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::dialog::{ButtonAction, ButtonSpec, DialogShell, labels};
use crate::error::WizardError;
use crate::form::Form;

type SubmitHandler = Box<dyn Fn(Value) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;
type CancelHandler = Box<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// StepSequencer
// ---------------------------------------------------------------------------

/// Linear step state: `1 <= current_step <= total_steps` plus accumulated
/// form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    current_step: usize,
    total_steps: usize,
    form_data: Map<String, Value>,
}

impl StepSequencer {
    /// A sequencer at step 1. `total_steps` below 1 is raised to 1.
    #[must_use]
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
            form_data: Map::new(),
        }
    }

    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.current_step
    }

    #[must_use]
    pub const fn total_steps(&self) -> usize {
        self.total_steps
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.current_step == 1
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.current_step == self.total_steps
    }

    #[must_use]
    pub const fn form_data(&self) -> &Map<String, Value> {
        &self.form_data
    }

    /// Advance one step. No-op on the last step; returns whether it moved.
    pub fn go_next(&mut self) -> bool {
        if self.current_step < self.total_steps {
            self.current_step += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step. No-op on the first step; returns whether it moved.
    pub fn go_previous(&mut self) -> bool {
        if self.current_step > 1 {
            self.current_step -= 1;
            true
        } else {
            false
        }
    }

    /// Back to step 1 with no accumulated data.
    pub fn reset(&mut self) {
        self.current_step = 1;
        self.form_data.clear();
    }

    /// Change the step count (minimum 1), clamping the current step so it
    /// stays in range.
    pub fn set_total_steps(&mut self, total_steps: usize) {
        self.total_steps = total_steps.max(1);
        if self.current_step > self.total_steps {
            tracing::warn!(
                from = self.current_step,
                to = self.total_steps,
                "step count shrank below current step; clamping"
            );
            self.current_step = self.total_steps;
        }
    }

    pub fn update_form_data(&mut self, form_data: Map<String, Value>) {
        self.form_data = form_data;
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Declaration of one wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepDef {
    /// Step key: the slice of form data this step edits, and its form id.
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl StepDef {
    /// A step editing the `id` slice of the form data.
    #[must_use]
    pub fn keyed(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// A step whose data merges into the top level.
    #[must_use]
    pub fn unkeyed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Entry of the step indicator shown above the step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepHeader {
    pub number: usize,
    pub title: String,
    pub description: Option<String>,
}

/// Result of submitting the current step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Stored the step's data and moved to `step`.
    Advanced { step: usize },
    /// Last step: the validated payload was handed to the submit callback.
    Submitted(Value),
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

pub struct Wizard {
    steps: Vec<StepDef>,
    schema: FormSchema,
    default_values: Value,
    sequencer: StepSequencer,
    shell: Arc<dyn DialogShell>,
    owner: Option<String>,
    on_submit: Option<SubmitHandler>,
    on_cancel: Option<CancelHandler>,
}

impl Wizard {
    #[must_use]
    pub fn builder(schema: FormSchema) -> WizardBuilder {
        WizardBuilder {
            schema,
            steps: Vec::new(),
            default_values: Value::Object(Map::new()),
            on_submit: None,
            on_cancel: None,
        }
    }

    #[must_use]
    pub const fn current_step(&self) -> usize {
        self.sequencer.current_step()
    }

    #[must_use]
    pub const fn total_steps(&self) -> usize {
        self.sequencer.total_steps()
    }

    #[must_use]
    pub const fn is_last_step(&self) -> bool {
        self.sequencer.is_last()
    }

    #[must_use]
    pub const fn form_data(&self) -> &Map<String, Value> {
        self.sequencer.form_data()
    }

    /// Id of the dialog this wizard publishes button state to.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub fn steps(&self) -> Vec<StepHeader> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepHeader {
                number: index + 1,
                title: step
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Step {}", index + 1)),
                description: step.description.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn current_step_def(&self) -> &StepDef {
        &self.steps[self.current_step() - 1]
    }

    #[must_use]
    pub fn current_step_key(&self) -> Option<&str> {
        self.current_step_def().id.as_deref()
    }

    /// Schema for the current step: the sub-schema under the step key when
    /// the wizard schema has one, otherwise the whole schema.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::Schema` if the sub-schema does not compile.
    pub fn current_step_schema(&self) -> Result<FormSchema, WizardError> {
        if let Some(key) = self.current_step_key() {
            if let Some(scoped) = self.schema.scoped(key)? {
                return Ok(scoped);
            }
        }
        Ok(self.schema.clone())
    }

    /// Initial values for the current step form: data already entered for
    /// the step, else the wizard defaults for it, else `{}`. List data is
    /// wrapped as `{ key: [...] }`.
    #[must_use]
    pub fn current_step_defaults(&self) -> Value {
        let Some(key) = self.current_step_key() else {
            return Value::Object(Map::new());
        };
        let entered = self.form_data().get(key).filter(|v| !v.is_null());
        let data = entered
            .or_else(|| self.default_values.get(key).filter(|v| !v.is_null()))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        if data.is_array() {
            let mut wrapped = Map::new();
            wrapped.insert(key.to_string(), data);
            Value::Object(wrapped)
        } else {
            data
        }
    }

    /// The form for the current step.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::Schema` if the step schema does not compile.
    pub fn current_form(&self) -> Result<Form, WizardError> {
        let id = self
            .current_step_key()
            .map_or_else(|| format!("step-{}", self.current_step()), String::from);
        Ok(Form::new(
            id,
            self.current_step_schema()?,
            self.current_step_defaults(),
        ))
    }

    /// Submit the current step with `values`.
    ///
    /// # Errors
    ///
    /// - `WizardError::Step` if the values fail the step schema
    /// - `WizardError::Validation` if, on the last step, the accumulated data
    ///   fails the wizard schema
    /// - `WizardError::Submit` if the submit callback fails
    pub async fn submit_step(&mut self, values: Value) -> Result<StepOutcome, WizardError> {
        let step_values = self
            .current_step_schema()?
            .validate(&values)
            .map_err(|failure| WizardError::Step {
                step: self.current_step(),
                failure,
            })?;
        self.accept_step_data(step_values).await
    }

    /// Submit the current step from a step form, updating the form's field
    /// errors on failure.
    ///
    /// # Errors
    ///
    /// See [`Wizard::submit_step`].
    pub async fn submit_form(&mut self, form: &mut Form) -> Result<StepOutcome, WizardError> {
        let step_values = form.validate().map_err(|failure| WizardError::Step {
            step: self.current_step(),
            failure,
        })?;
        self.accept_step_data(step_values).await
    }

    /// Go back one step (no-op on the first step).
    pub fn previous(&mut self) {
        if self.sequencer.go_previous() {
            self.publish_buttons();
        }
    }

    /// Discard all progress and close.
    ///
    /// Runs the cancel callback when one is set, otherwise pops the owning
    /// dialog.
    pub fn cancel(&mut self) {
        self.sequencer.reset();
        self.publish_buttons();
        match &self.on_cancel {
            Some(on_cancel) => on_cancel(),
            None => self.shell.pop_dialog(None),
        }
    }

    /// Back to step 1 with no data, keeping the dialog open.
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.publish_buttons();
    }

    /// Run a non-submit button action. Returns `false` for
    /// [`ButtonAction::SubmitForm`], which the caller handles by submitting
    /// the named form.
    pub fn handle_action(&mut self, action: &ButtonAction) -> bool {
        match action {
            ButtonAction::Previous => {
                self.previous();
                true
            }
            ButtonAction::Cancel => {
                self.cancel();
                true
            }
            ButtonAction::SubmitForm(_) => false,
        }
    }

    /// Replace the step list (e.g. conditional steps appearing).
    ///
    /// # Errors
    ///
    /// Returns `WizardError::NoSteps` for an empty list.
    pub fn set_steps(&mut self, steps: Vec<StepDef>) -> Result<(), WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        self.sequencer.set_total_steps(steps.len());
        self.steps = steps;
        self.publish_buttons();
        Ok(())
    }

    async fn accept_step_data(&mut self, step_data: Value) -> Result<StepOutcome, WizardError> {
        let key = self.current_step_key().map(String::from);
        let mut form_data = self.form_data().clone();

        match key {
            Some(key) => {
                let stored = unwrap_single_key(step_data, &key);
                form_data.insert(key, stored);
            }
            None => match step_data {
                Value::Object(map) => form_data.extend(map),
                other => {
                    tracing::warn!(step = self.current_step(), value = %other, "ignoring non-object data from unkeyed step");
                }
            },
        }
        self.sequencer.update_form_data(form_data);

        if !self.sequencer.is_last() {
            self.sequencer.go_next();
            self.publish_buttons();
            tracing::debug!(step = self.current_step(), "wizard advanced");
            return Ok(StepOutcome::Advanced {
                step: self.current_step(),
            });
        }

        let data = Value::Object(self.form_data().clone());
        let validated = self.schema.validate(&data).map_err(|failure| {
            let steps = self.steps_owning(&failure);
            WizardError::Validation { failure, steps }
        })?;

        if let Some(on_submit) = &self.on_submit {
            on_submit(validated.clone())
                .await
                .map_err(WizardError::Submit)?;
        }
        tracing::debug!("wizard submitted");
        Ok(StepOutcome::Submitted(validated))
    }

    /// Step numbers whose keys own at least one failing field.
    fn steps_owning(&self, failure: &ValidationFailure) -> Vec<usize> {
        let roots = failure.root_fields();
        self.steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.id.as_deref().is_some_and(|id| roots.contains(&id)))
            .map(|(index, _)| index + 1)
            .collect()
    }

    fn publish_buttons(&self) {
        let Some(owner) = self.owner.as_deref() else {
            return;
        };
        let form = self.current_step_key();

        let primary_label = if self.sequencer.is_last() {
            labels::CONFIRM
        } else {
            labels::NEXT
        };
        self.shell
            .update_primary_button(ButtonSpec::submit(primary_label, form), owner);

        let secondary = if self.sequencer.is_first() {
            ButtonSpec::secondary(labels::CANCEL, "x", ButtonAction::Cancel)
        } else {
            ButtonSpec::secondary(labels::PREVIOUS, "chevronLeft", ButtonAction::Previous)
        };
        self.shell.update_secondary_button(secondary, owner);
        self.shell.update_show_buttons(true, owner);
    }
}

/// `{ key: x }` submitted by a step keyed `key` is stored as `x`.
fn unwrap_single_key(data: Value, key: &str) -> Value {
    match data {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// WizardBuilder
// ---------------------------------------------------------------------------

pub struct WizardBuilder {
    schema: FormSchema,
    steps: Vec<StepDef>,
    default_values: Value,
    on_submit: Option<SubmitHandler>,
    on_cancel: Option<CancelHandler>,
}

impl WizardBuilder {
    #[must_use]
    pub fn step(mut self, step: StepDef) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn default_values(mut self, default_values: Value) -> Self {
        self.default_values = default_values;
        self
    }

    /// Callback receiving the validated payload on the last step.
    #[must_use]
    pub fn on_submit<F, Fut, E>(mut self, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: std::fmt::Display,
    {
        self.on_submit = Some(Box::new(move |data| {
            handler(data).map(|r| r.map_err(|e| e.to_string())).boxed()
        }));
        self
    }

    #[must_use]
    pub fn on_cancel<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_cancel = Some(Box::new(handler));
        self
    }

    /// Mount the wizard inside the shell's current dialog and publish the
    /// initial button state.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::NoSteps` if no step was declared.
    pub fn build(self, shell: Arc<dyn DialogShell>) -> Result<Wizard, WizardError> {
        if self.steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        let owner = shell.current_dialog().map(|dialog| dialog.id);
        let wizard = Wizard {
            sequencer: StepSequencer::new(self.steps.len()),
            steps: self.steps,
            schema: self.schema,
            default_values: self.default_values,
            shell,
            owner,
            on_submit: self.on_submit,
            on_cancel: self.on_cancel,
        };
        wizard.publish_buttons();
        Ok(wizard)
    }
}
