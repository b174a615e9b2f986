//! Entity CRUD facade.
//!
//! Wraps one resource's [`Endpoints`] with cached reads and mutations that
//! invalidate every namespace the resource's data appears under.

use std::collections::HashSet;
use std::sync::Arc;

use campus_core::api::{ApiError, ApiResponse};
use futures::future::join_all;
use serde_json::Value;

use crate::bulk::{BulkDeleteReport, DeleteOutcome};
use crate::cache::{QueryCache, QueryKey, QueryState};
use crate::endpoints::Endpoints;
use crate::error::CrudError;
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Disabled query: nothing was fetched.
    Idle,
    Success,
    Error,
}

/// Read result handed to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Fetched data, or the query's placeholder (`[]` for lists, `null` for
    /// single records) when there is none.
    pub data: Value,
    pub status: QueryStatus,
    pub error: Option<ApiError>,
}

impl QueryResult {
    fn idle(placeholder: Value) -> Self {
        Self {
            data: placeholder,
            status: QueryStatus::Idle,
            error: None,
        }
    }

    fn from_fetch(result: Result<Value, ApiError>, placeholder: Value) -> Self {
        match result {
            Ok(data) => Self {
                data,
                status: QueryStatus::Success,
                error: None,
            },
            Err(error) => Self {
                data: placeholder,
                status: QueryStatus::Error,
                error: Some(error),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Success)
    }
}

pub struct EntityCrud<E> {
    endpoints: E,
    namespaces: Vec<String>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl<E: Endpoints> EntityCrud<E> {
    /// `namespaces[0]` keys this resource's queries; all of them are
    /// invalidated after a successful mutation. Repeated names are dropped.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::NoNamespaces` if `namespaces` is empty.
    pub fn new(
        endpoints: E,
        mut namespaces: Vec<String>,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CrudError> {
        if namespaces.is_empty() {
            return Err(CrudError::NoNamespaces);
        }
        let mut seen = HashSet::new();
        namespaces.retain(|ns| seen.insert(ns.clone()));
        Ok(Self {
            endpoints,
            namespaces,
            cache,
            notifier,
        })
    }

    #[must_use]
    pub fn primary_namespace(&self) -> &str {
        &self.namespaces[0]
    }

    #[must_use]
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    #[must_use]
    pub const fn endpoints(&self) -> &E {
        &self.endpoints
    }

    /// Fetch the collection, reusing a cached success.
    pub async fn get_all(&self, enabled: bool) -> QueryResult {
        let placeholder = Value::Array(Vec::new());
        if !enabled {
            return QueryResult::idle(placeholder);
        }
        let key = QueryKey::all(self.primary_namespace());
        let result = self
            .cached_or_fetch(&key, || self.endpoints.get_all())
            .await;
        QueryResult::from_fetch(result, placeholder)
    }

    /// Fetch one record. Disabled when `enabled` is false or `id` is empty.
    pub async fn get_by_id(&self, id: &str, enabled: bool) -> QueryResult {
        if !enabled || id.is_empty() {
            return QueryResult::idle(Value::Null);
        }
        let key = QueryKey::by_id(self.primary_namespace(), id);
        let result = self
            .cached_or_fetch(&key, || self.endpoints.get_by_id(id))
            .await;
        QueryResult::from_fetch(result, Value::Null)
    }

    /// # Errors
    ///
    /// Returns the endpoint's `ApiError`; the user has already been notified.
    pub async fn create(&self, payload: Value) -> Result<ApiResponse, ApiError> {
        let result = self.endpoints.create(payload).await;
        self.finish_mutation("create", result)
    }

    /// # Errors
    ///
    /// Returns the endpoint's `ApiError`; the user has already been notified.
    pub async fn update(&self, payload: Value) -> Result<ApiResponse, ApiError> {
        let result = self.endpoints.update(payload).await;
        self.finish_mutation("update", result)
    }

    /// # Errors
    ///
    /// Returns the endpoint's `ApiError`; the user has already been notified.
    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ApiError> {
        let result = self.endpoints.delete(id).await;
        self.finish_mutation("delete", result)
    }

    /// Delete every id concurrently.
    ///
    /// Namespaces are invalidated once if at least one delete succeeded. The
    /// user gets one notification: success when all deletes succeeded,
    /// otherwise the first failure's message.
    pub async fn bulk_delete(&self, ids: &[String]) -> BulkDeleteReport {
        let results = join_all(ids.iter().map(|id| self.endpoints.delete(id))).await;
        let report = BulkDeleteReport {
            outcomes: ids
                .iter()
                .cloned()
                .zip(results)
                .map(|(id, result)| DeleteOutcome { id, result })
                .collect(),
        };

        if report.any_succeeded() {
            self.invalidate_all();
        }
        if let Some(error) = report.first_error() {
            tracing::debug!(
                resource = self.primary_namespace(),
                failed = report.failed().count(),
                total = ids.len(),
                "bulk delete partially failed"
            );
            self.notifier.error(&error.message);
        } else if let Some(first) = report.outcomes.first() {
            if let Ok(response) = &first.result {
                self.notifier.success(&response.message);
            }
        }
        report
    }

    async fn cached_or_fetch<F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<Value, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<ApiResponse, ApiError>>,
    {
        if let QueryState::Success(data) = self.cache.state(key) {
            return Ok(data);
        }
        let generation = self.cache.generation(&key.namespace);
        self.cache.set_loading(key);

        let result = fetch().await.map(|response| response.data);
        let state = match &result {
            Ok(data) => QueryState::Success(data.clone()),
            Err(error) => QueryState::Error(error.clone()),
        };
        if !self.cache.store(key, generation, state) {
            tracing::debug!(namespace = %key.namespace, "discarding fetch result from before invalidation");
        }
        result
    }

    fn finish_mutation(
        &self,
        operation: &str,
        result: Result<ApiResponse, ApiError>,
    ) -> Result<ApiResponse, ApiError> {
        match &result {
            Ok(response) => {
                self.invalidate_all();
                self.notifier.success(&response.message);
            }
            Err(error) => {
                tracing::debug!(
                    resource = self.primary_namespace(),
                    operation,
                    status = error.status,
                    "mutation failed"
                );
                self.notifier.error(&error.message);
            }
        }
        result
    }

    fn invalidate_all(&self) {
        for namespace in &self.namespaces {
            self.cache.invalidate(namespace);
        }
    }
}
