//! Multi-record payloads assembled by grouped and multi-step forms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Parent, Student};

/// Bulk parent entry: one form row per parent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentsForm {
    #[schemars(length(min = 1))]
    pub parents: Vec<Parent>,
}

/// A student enrolled together with their parents, built step by step by the
/// enrollment wizard (`student` step, then `parents` step).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FullStudent {
    pub student: Student,
    #[schemars(length(min = 1))]
    pub parents: Vec<Parent>,
}
