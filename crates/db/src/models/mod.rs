//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Create / update DTOs built by the API layer after validation

pub mod application;
pub mod manager;
pub mod property;
pub mod tenant;
