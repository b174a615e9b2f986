use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_attendance_requirement() -> f64 {
    75.0
}

const fn default_late_submission_penalty() -> f64 {
    10.0
}

const fn default_max_class_size() -> u32 {
    30
}

const fn enabled() -> bool {
    true
}

/// School-wide settings edited from the settings page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[schemars(length(min = 2, max = 200))]
    pub school_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 500))]
    pub school_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 10, max = 20))]
    pub school_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(email)]
    pub school_email: Option<String>,
    #[schemars(regex(pattern = r"^\d{4}-\d{4}$"))]
    pub current_academic_year: String,
    #[serde(default = "default_attendance_requirement")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub attendance_requirement: f64,
    #[serde(default = "default_late_submission_penalty")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub late_submission_penalty: f64,
    #[serde(default = "default_max_class_size")]
    #[schemars(range(min = 1, max = 200))]
    pub max_class_size: u32,
    #[serde(default = "enabled")]
    pub academic_alerts: bool,
    #[serde(default = "enabled")]
    pub attendance_alerts: bool,
}
