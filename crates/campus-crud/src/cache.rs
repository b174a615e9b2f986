//! Shared query cache keyed by namespace.
//!
//! Entries live under the namespace that produced them. Invalidating a
//! namespace drops its entries and bumps its generation counter, so a fetch
//! that started before the invalidation never writes back stale data.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use campus_core::api::ApiError;
use serde_json::Value;

/// Cache key: namespace plus the record id (`None` for the collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub namespace: String,
    pub id: Option<String>,
}

impl QueryKey {
    #[must_use]
    pub fn all(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            id: None,
        }
    }

    #[must_use]
    pub fn by_id(namespace: &str, id: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            id: Some(id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Loading,
    Success(Value),
    Error(ApiError),
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<QueryKey, QueryState>,
    generations: HashMap<String, u64>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    inner: Mutex<Inner>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `key`; `Idle` if never fetched or invalidated.
    #[must_use]
    pub fn state(&self, key: &QueryKey) -> QueryState {
        self.lock()
            .entries
            .get(key)
            .cloned()
            .unwrap_or(QueryState::Idle)
    }

    /// Number of times `namespace` has been invalidated.
    #[must_use]
    pub fn generation(&self, namespace: &str) -> u64 {
        self.lock()
            .generations
            .get(namespace)
            .copied()
            .unwrap_or_default()
    }

    /// Drop every entry under `namespace`.
    pub fn invalidate(&self, namespace: &str) {
        let mut inner = self.lock();
        inner.entries.retain(|key, _| key.namespace != namespace);
        *inner.generations.entry(namespace.to_string()).or_default() += 1;
        tracing::debug!(namespace, "query cache invalidated");
    }

    pub fn set_loading(&self, key: &QueryKey) {
        self.lock().entries.insert(key.clone(), QueryState::Loading);
    }

    /// Store a result fetched while `namespace` was at `generation`.
    ///
    /// Returns `false` (and stores nothing) if the namespace was invalidated
    /// in the meantime.
    pub fn store(&self, key: &QueryKey, generation: u64, state: QueryState) -> bool {
        let mut inner = self.lock();
        let current = inner
            .generations
            .get(&key.namespace)
            .copied()
            .unwrap_or_default();
        if current != generation {
            return false;
        }
        inner.entries.insert(key.clone(), state);
        true
    }

    pub fn set_success(&self, key: &QueryKey, data: Value) {
        self.lock()
            .entries
            .insert(key.clone(), QueryState::Success(data));
    }

    pub fn set_error(&self, key: &QueryKey, error: ApiError) {
        self.lock()
            .entries
            .insert(key.clone(), QueryState::Error(error));
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
