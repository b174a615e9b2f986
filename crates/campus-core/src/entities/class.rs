use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A grade-level class for one academic year.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schemars(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 500))]
    pub description: Option<String>,
    #[schemars(regex(pattern = r"^\d{4}-\d{4}$"))]
    pub academic_year: String,
    #[schemars(length(min = 1))]
    pub level: String,
}
