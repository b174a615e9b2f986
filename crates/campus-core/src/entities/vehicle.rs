use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VehicleType;

/// A school transport vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schemars(length(min = 2, max = 100))]
    pub name: String,
    #[schemars(length(min = 2, max = 100))]
    pub brand: String,
    #[schemars(length(min = 2, max = 100))]
    pub model: String,
    #[schemars(range(min = 1900, max = 2100))]
    pub year: u16,
    #[serde(default, rename = "type")]
    pub vehicle_type: VehicleType,
    #[schemars(range(min = 1, max = 200))]
    pub capacity: u16,
    #[schemars(length(min = 2, max = 50))]
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d{4}-\d{2}-\d{2}$"))]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 10_000_000.0))]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 10_000_000.0))]
    pub current_mileage: Option<f64>,
}
