//! Status and category enums for Campus entities.
//!
//! Serialized in `snake_case` (lowercase for single-word variants), matching
//! the values the backend stores.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Return the wire representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    M,
    F,
}

string_enum!(Gender { M => "M", F => "F" });

// ---------------------------------------------------------------------------
// RelationshipType
// ---------------------------------------------------------------------------

/// How a parent or guardian relates to a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Father,
    Mother,
    Guardian,
    Other,
}

string_enum!(RelationshipType {
    Father => "father",
    Mother => "mother",
    Guardian => "guardian",
    Other => "other",
});

// ---------------------------------------------------------------------------
// StudentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Transferred,
    Suspended,
}

string_enum!(StudentStatus {
    Active => "active",
    Inactive => "inactive",
    Graduated => "graduated",
    Transferred => "transferred",
    Suspended => "suspended",
});

// ---------------------------------------------------------------------------
// SectionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    #[default]
    Active,
    Inactive,
}

string_enum!(SectionStatus { Active => "active", Inactive => "inactive" });

// ---------------------------------------------------------------------------
// PaymentType / FeeTypeStatus
// ---------------------------------------------------------------------------

/// Whether a fee is charged once or on a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    OneTime,
    #[default]
    Recurring,
}

string_enum!(PaymentType { OneTime => "one_time", Recurring => "recurring" });

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeeTypeStatus {
    #[default]
    Active,
    Inactive,
}

string_enum!(FeeTypeStatus { Active => "active", Inactive => "inactive" });

// ---------------------------------------------------------------------------
// VehicleType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Fullbus,
    Minibus,
    Van,
    Car,
}

string_enum!(VehicleType {
    Fullbus => "fullbus",
    Minibus => "minibus",
    Van => "van",
    Car => "car",
});

// ---------------------------------------------------------------------------
// DuplicatePolicy
// ---------------------------------------------------------------------------

/// What a form group does when a form registers under an id that is
/// already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the existing registration (last registration wins).
    #[default]
    Overwrite,
    /// Refuse the new registration.
    Reject,
}

string_enum!(DuplicatePolicy { Overwrite => "overwrite", Reject => "reject" });
