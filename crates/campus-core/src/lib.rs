//! # campus-core
//!
//! Core types shared across all Campus crates:
//! - Entity structs for every administrable record (roles, classes, sections,
//!   subjects, fee types, vehicles, parents, students, settings)
//! - Status and category enums
//! - The API envelope returned by every backend endpoint
//! - Cross-cutting error types
//!
//! Entity structs derive `JsonSchema` with field constraints so `campus-schema`
//! can turn them into form validation schemas.

pub mod api;
pub mod entities;
pub mod enums;
pub mod errors;
