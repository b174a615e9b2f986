//! Form group coordinator.
//!
//! A `FormGroup` is scoped to one dialog or page: forms nested in it register
//! a submit invoker on mount and the group submits all of them together.
//! Submission is all-or-nothing: either every form validates and the caller
//! gets one combined payload, or the caller gets every failure and no data.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use campus_core::enums::DuplicatePolicy;
use futures::FutureExt;
use futures::future::join_all;
use serde_json::{Map, Value};

use crate::error::FormError;
use crate::registry::{FormRegistry, SubmitInvoker};

/// Coordinates validation and submission across registered forms.
#[derive(Clone, Default)]
pub struct FormGroup {
    registry: Arc<Mutex<FormRegistry>>,
}

impl FormGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            registry: Arc::new(Mutex::new(FormRegistry::new(policy))),
        }
    }

    /// Register a form's submit invoker under `id`.
    ///
    /// The returned guard unregisters the form when dropped, unless the id has
    /// since been taken over by a newer registration.
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateForm` if `id` is taken and the group
    /// rejects duplicates.
    pub fn register_form<F, Fut>(
        &self,
        id: impl Into<String>,
        invoker: F,
    ) -> Result<Registration, FormError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, FormError>> + Send + 'static,
    {
        let invoker: SubmitInvoker = Arc::new(move || invoker().boxed());
        self.register_invoker(id, invoker)
    }

    /// Register an already boxed invoker.
    ///
    /// # Errors
    ///
    /// See [`FormGroup::register_form`].
    pub fn register_invoker(
        &self,
        id: impl Into<String>,
        invoker: SubmitInvoker,
    ) -> Result<Registration, FormError> {
        let id = id.into();
        let handle = self.lock().register_form(id.clone(), invoker)?;
        Ok(Registration {
            id,
            handle,
            registry: Some(Arc::downgrade(&self.registry)),
        })
    }

    /// Remove the form registered under `id`. Returns whether it was present.
    pub fn unregister_form(&self, id: &str) -> bool {
        self.lock().unregister_form(id)
    }

    /// Number of currently registered forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run every registered form's invoker concurrently and combine results.
    ///
    /// All invokers are started before any is awaited. Forms registered or
    /// removed while the submission is in flight do not change it: the set of
    /// invokers is fixed when this is called.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Group` listing every failing form if any invoker
    /// fails.
    pub async fn submit_group(&self) -> Result<GroupSubmission, FormError> {
        let entries = self.lock().snapshot();
        tracing::debug!(forms = entries.len(), "submitting form group");

        let results = join_all(entries.iter().map(|(_, invoker)| invoker())).await;

        let mut values = Vec::with_capacity(entries.len());
        let mut errors = Vec::new();
        for ((id, _), result) in entries.into_iter().zip(results) {
            match result {
                Ok(value) => values.push((id, value)),
                Err(error) => errors.push((id, error)),
            }
        }

        if errors.is_empty() {
            Ok(GroupSubmission { entries: values })
        } else {
            tracing::debug!(
                failed = errors.len(),
                succeeded = values.len(),
                "form group submission rejected"
            );
            Err(FormError::Group { errors })
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a form registered while alive.
#[must_use = "dropping a Registration unregisters the form"]
pub struct Registration {
    id: String,
    handle: u64,
    registry: Option<Weak<Mutex<FormRegistry>>>,
}

impl Registration {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Keep the form registered for the rest of the group's lifetime.
    pub fn detach(mut self) {
        self.registry = None;
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let removed = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .unregister_handle(&self.id, self.handle);
        if removed {
            tracing::debug!(form = %self.id, "form unregistered");
        }
    }
}

/// Validated output of every form in a group, in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSubmission {
    entries: Vec<(String, Value)>,
}

impl GroupSubmission {
    /// Output of form `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.iter().find(|(f, _)| f == id).map(|(_, v)| v)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combine into one JSON object keyed by form id.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries.into_iter().collect::<Map<String, Value>>())
    }
}

impl IntoIterator for GroupSubmission {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_schema::{FieldError, ValidationFailure};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn invalid(path: &str) -> FormError {
        FormError::Invalid(ValidationFailure {
            field_errors: vec![FieldError::new(path, "required")],
        })
    }

    #[tokio::test]
    async fn combines_results_keyed_by_form_id() {
        let group = FormGroup::new();
        let _a = group
            .register_form("a", || async { Ok(json!({ "x": 1 })) })
            .unwrap();
        let _b = group
            .register_form("b", || async { Ok(json!({ "y": 2 })) })
            .unwrap();

        let submission = group.submit_group().await.unwrap();
        assert_eq!(
            submission.into_value(),
            json!({ "a": { "x": 1 }, "b": { "y": 2 } })
        );
    }

    #[tokio::test]
    async fn any_failure_rejects_the_whole_group() {
        let group = FormGroup::new();
        let _a = group
            .register_form("a", || async { Ok(json!({ "x": 1 })) })
            .unwrap();
        let _b = group
            .register_form("b", || async { Err(invalid("y")) })
            .unwrap();

        let err = group.submit_group().await.unwrap_err();
        let FormError::Group { errors } = &err else {
            panic!("expected group error, got {err:?}");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "b");
        assert!(err.for_form("a").is_none());
        assert!(matches!(err.for_form("b"), Some(FormError::Invalid(_))));
    }

    #[tokio::test]
    async fn order_follows_registration_not_completion() {
        let group = FormGroup::new();
        let _slow = group
            .register_form("slow", || async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(json!("slow"))
            })
            .unwrap();
        let _fast = group
            .register_form("fast", || async { Ok(json!("fast")) })
            .unwrap();

        let submission = group.submit_group().await.unwrap();
        assert_eq!(submission.ids().collect::<Vec<_>>(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn invokers_are_started_before_any_completes() {
        let started = Arc::new(AtomicUsize::new(0));
        let group = FormGroup::new();
        let mut guards = Vec::new();
        for id in ["a", "b", "c"] {
            let started = Arc::clone(&started);
            guards.push(
                group
                    .register_form(id, move || {
                        let started = Arc::clone(&started);
                        async move {
                            started.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            Ok(json!(started.load(Ordering::SeqCst)))
                        }
                    })
                    .unwrap(),
            );
        }

        let submission = group.submit_group().await.unwrap();
        for (_, seen) in submission {
            assert_eq!(seen, json!(3));
        }
    }

    #[tokio::test]
    async fn dropping_registration_unregisters() {
        let group = FormGroup::new();
        let guard = group
            .register_form("a", || async { Ok(json!(1)) })
            .unwrap();
        assert_eq!(group.len(), 1);
        drop(guard);
        assert!(group.is_empty());
        assert!(group.submit_group().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stale_guard_keeps_newer_registration() {
        let group = FormGroup::new();
        let old = group
            .register_form("a", || async { Ok(json!("old")) })
            .unwrap();
        let _new = group
            .register_form("a", || async { Ok(json!("new")) })
            .unwrap();
        drop(old);

        let submission = group.submit_group().await.unwrap();
        assert_eq!(submission.get("a"), Some(&json!("new")));
    }

    #[tokio::test]
    async fn detached_registration_survives_guard() {
        let group = FormGroup::new();
        group
            .register_form("a", || async { Ok(json!(1)) })
            .unwrap()
            .detach();
        assert_eq!(group.len(), 1);
        assert!(group.unregister_form("a"));
    }

    #[test]
    fn reject_policy_surfaces_duplicate() {
        let group = FormGroup::with_policy(DuplicatePolicy::Reject);
        let _a = group
            .register_form("a", || async { Ok(json!(1)) })
            .unwrap();
        let err = group
            .register_form("a", || async { Ok(json!(2)) })
            .err()
            .unwrap();
        assert!(matches!(err, FormError::DuplicateForm(_)));
    }
}
