//! Dialog shell collaborator.
//!
//! A multi-step form lives inside a dialog whose button bar is owned by the
//! shell. The wizard tells the shell what the buttons should say and do; the
//! shell never feeds anything back into the wizard's own state.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

/// Translation keys for button labels.
pub mod labels {
    pub const NEXT: &str = "common.next";
    pub const CONFIRM: &str = "common.confirm";
    pub const PREVIOUS: &str = "common.previous";
    pub const CANCEL: &str = "common.cancel";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    Default,
    Secondary,
}

/// What a click on a button should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Submit the form with this id (`None` for an unnamed step form).
    SubmitForm(Option<String>),
    Previous,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonSpec {
    pub label_key: String,
    pub variant: ButtonVariant,
    pub icon: Option<String>,
    /// Id of the form the button submits, if any.
    pub form: Option<String>,
    pub action: ButtonAction,
    pub loading: bool,
    pub disabled: bool,
}

impl ButtonSpec {
    /// A primary button submitting `form`.
    #[must_use]
    pub fn submit(label_key: &str, form: Option<&str>) -> Self {
        Self {
            label_key: label_key.to_string(),
            variant: ButtonVariant::Default,
            icon: None,
            form: form.map(String::from),
            action: ButtonAction::SubmitForm(form.map(String::from)),
            loading: false,
            disabled: false,
        }
    }

    /// A secondary button running `action`.
    #[must_use]
    pub fn secondary(label_key: &str, icon: &str, action: ButtonAction) -> Self {
        Self {
            label_key: label_key.to_string(),
            variant: ButtonVariant::Secondary,
            icon: Some(icon.to_string()),
            form: None,
            action,
            loading: false,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogRef {
    pub id: String,
}

/// Button bar and dialog stack of the surrounding UI shell.
///
/// All calls are notifications; implementations must not call back into the
/// wizard synchronously.
pub trait DialogShell: Send + Sync {
    fn update_primary_button(&self, spec: ButtonSpec, owner: &str);
    fn update_secondary_button(&self, spec: ButtonSpec, owner: &str);
    fn update_show_buttons(&self, show: bool, owner: &str);
    fn pop_dialog(&self, result: Option<Value>);
    fn current_dialog(&self) -> Option<DialogRef>;
}

/// Notification received by a [`RecordingShell`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShellEvent {
    Primary { spec: ButtonSpec, owner: String },
    Secondary { spec: ButtonSpec, owner: String },
    ShowButtons { show: bool, owner: String },
    Pop { result: Option<Value> },
}

/// Shell that records every notification. Used headless (CLI) and in tests.
#[derive(Debug, Default)]
pub struct RecordingShell {
    dialog: Option<DialogRef>,
    events: Mutex<Vec<ShellEvent>>,
}

impl RecordingShell {
    /// A shell with an open dialog `dialog_id`.
    #[must_use]
    pub fn with_dialog(dialog_id: &str) -> Self {
        Self {
            dialog: Some(DialogRef {
                id: dialog_id.to_string(),
            }),
            events: Mutex::default(),
        }
    }

    #[must_use]
    pub fn events(&self) -> Vec<ShellEvent> {
        self.lock().clone()
    }

    /// Most recent primary button published.
    #[must_use]
    pub fn primary(&self) -> Option<ButtonSpec> {
        self.lock().iter().rev().find_map(|e| match e {
            ShellEvent::Primary { spec, .. } => Some(spec.clone()),
            _ => None,
        })
    }

    /// Most recent secondary button published.
    #[must_use]
    pub fn secondary(&self) -> Option<ButtonSpec> {
        self.lock().iter().rev().find_map(|e| match e {
            ShellEvent::Secondary { spec, .. } => Some(spec.clone()),
            _ => None,
        })
    }

    fn push(&self, event: ShellEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ShellEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DialogShell for RecordingShell {
    fn update_primary_button(&self, spec: ButtonSpec, owner: &str) {
        self.push(ShellEvent::Primary {
            spec,
            owner: owner.to_string(),
        });
    }

    fn update_secondary_button(&self, spec: ButtonSpec, owner: &str) {
        self.push(ShellEvent::Secondary {
            spec,
            owner: owner.to_string(),
        });
    }

    fn update_show_buttons(&self, show: bool, owner: &str) {
        self.push(ShellEvent::ShowButtons {
            show,
            owner: owner.to_string(),
        });
    }

    fn pop_dialog(&self, result: Option<Value>) {
        self.push(ShellEvent::Pop { result });
    }

    fn current_dialog(&self) -> Option<DialogRef> {
        self.dialog.clone()
    }
}
