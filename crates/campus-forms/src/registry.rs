//! Form registration registry.
//!
//! Maps form ids to submit invokers. Each entry is stamped with a handle so a
//! stale [`Registration`](crate::Registration) guard cannot remove a newer
//! registration that reused its id.

use std::sync::Arc;

use campus_core::enums::DuplicatePolicy;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::FormError;

/// Future returned by a submit invoker: the form's validated output.
pub type SubmitFuture = BoxFuture<'static, Result<Value, FormError>>;

/// Callback that runs one form's validation and submit.
pub type SubmitInvoker = Arc<dyn Fn() -> SubmitFuture + Send + Sync>;

struct Entry {
    id: String,
    handle: u64,
    invoker: SubmitInvoker,
}

/// Registered forms of one group, in registration order.
pub struct FormRegistry {
    entries: Vec<Entry>,
    policy: DuplicatePolicy,
    next_handle: u64,
}

impl FormRegistry {
    #[must_use]
    pub const fn new(policy: DuplicatePolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            next_handle: 0,
        }
    }

    /// Store `invoker` under `id`, returning the entry's handle.
    ///
    /// With [`DuplicatePolicy::Overwrite`] a taken id is replaced in place,
    /// keeping its original position in submission order.
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateForm` if `id` is taken and the policy is
    /// [`DuplicatePolicy::Reject`].
    pub fn register_form(
        &mut self,
        id: impl Into<String>,
        invoker: SubmitInvoker,
    ) -> Result<u64, FormError> {
        let id = id.into();
        let handle = self.next_handle;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            if self.policy == DuplicatePolicy::Reject {
                return Err(FormError::DuplicateForm(id));
            }
            tracing::warn!(form = %id, "form id registered twice; replacing previous registration");
            entry.handle = handle;
            entry.invoker = invoker;
        } else {
            tracing::debug!(form = %id, "form registered");
            self.entries.push(Entry {
                id,
                handle,
                invoker,
            });
        }

        self.next_handle += 1;
        Ok(handle)
    }

    /// Remove the form registered under `id`. Returns whether it was present.
    pub fn unregister_form(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        before != self.entries.len()
    }

    /// Remove `id` only if it is still the registration identified by
    /// `handle`.
    pub(crate) fn unregister_handle(&mut self, id: &str, handle: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.id == id && e.handle == handle));
        before != self.entries.len()
    }

    /// Current `(id, invoker)` pairs in registration order.
    pub(crate) fn snapshot(&self) -> Vec<(String, SubmitInvoker)> {
        self.entries
            .iter()
            .map(|e| (e.id.clone(), Arc::clone(&e.invoker)))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}
