//! Entity structs for every administrable Campus record.
//!
//! Field names serialize in `camelCase`, matching the backend API. Field
//! constraints (`length`, `range`, `regex`, `email`) are declared through
//! `schemars` so the generated JSON Schemas double as form validation schemas.

mod aggregate;
mod class;
mod fee_type;
mod parent;
mod role;
mod section;
mod settings;
mod student;
mod subject;
mod vehicle;

pub use aggregate::{FullStudent, ParentsForm};
pub use class::Class;
pub use fee_type::FeeType;
pub use parent::Parent;
pub use role::Role;
pub use section::Section;
pub use settings::Settings;
pub use student::Student;
pub use subject::Subject;
pub use vehicle::Vehicle;
