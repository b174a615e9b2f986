use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FeeTypeStatus, PaymentType};

/// A kind of fee charged to students (tuition, transport, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schemars(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 500))]
    pub description: Option<String>,
    pub category: String,
    #[schemars(range(min = 0.01, max = 100_000.0))]
    pub amount: f64,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub status: FeeTypeStatus,
}
