use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SectionStatus;

const fn default_max_students() -> u32 {
    30
}

/// A room-level subdivision of a class.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schemars(length(min = 1))]
    pub class_id: String,
    #[schemars(length(min = 1, max = 10))]
    pub name: String,
    #[serde(default = "default_max_students")]
    #[schemars(range(min = 1, max = 100))]
    pub max_students: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 20))]
    pub room_number: Option<String>,
    #[serde(default)]
    pub status: SectionStatus,
}
