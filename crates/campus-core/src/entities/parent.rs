use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, RelationshipType};

/// A parent or guardian attached to one or more students.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schemars(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(email)]
    pub email: Option<String>,
    #[schemars(regex(pattern = r"^[+]?[1-9]\d{0,15}$"))]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 500))]
    pub address: Option<String>,
    #[schemars(length(min = 8, max = 20))]
    pub cin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 100))]
    pub occupation: Option<String>,
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub is_emergency_contact: bool,
}
