//! Result of deleting several records at once.

use campus_core::api::{ApiError, ApiResponse};

/// Outcome of one delete within a bulk delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub id: String,
    pub result: Result<ApiResponse, ApiError>,
}

/// Per-record outcomes of a bulk delete, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDeleteReport {
    pub outcomes: Vec<DeleteOutcome>,
}

impl BulkDeleteReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.id.as_str())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &ApiError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.id.as_str(), e)))
    }

    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_ok())
    }

    #[must_use]
    pub fn first_error(&self) -> Option<&ApiError> {
        self.failed().next().map(|(_, e)| e)
    }

    /// All responses, or the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first `ApiError` in request order if any delete failed.
    pub fn into_result(self) -> Result<Vec<ApiResponse>, ApiError> {
        self.outcomes.into_iter().map(|o| o.result).collect()
    }
}
