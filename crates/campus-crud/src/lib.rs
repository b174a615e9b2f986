//! # campus-crud
//!
//! Uniform create/read/update/delete access to backend resources.
//!
//! An [`EntityCrud`] wraps one resource's [`Endpoints`] and adds:
//! - cached reads through a shared [`QueryCache`]
//! - invalidation of every related namespace after a successful mutation
//! - one user notification per mutation through a [`Notifier`]
//!
//! [`RestEndpoints`] implements [`Endpoints`] against the Campus REST API.

mod bulk;
mod cache;
mod endpoints;
mod error;
mod facade;
mod http;
mod notify;

pub use bulk::{BulkDeleteReport, DeleteOutcome};
pub use cache::{QueryCache, QueryKey, QueryState};
pub use endpoints::{Endpoints, payload_id};
pub use error::CrudError;
pub use facade::{EntityCrud, QueryResult, QueryStatus};
pub use http::RestEndpoints;
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
