use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, StudentStatus};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub student_code: String,
    #[schemars(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(email)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^[+]?[1-9]\d{0,15}$"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub date_of_birth: Option<String>,
    pub gender: Gender,
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub enrollment_date: String,
    #[serde(default)]
    pub status: StudentStatus,
}
