//! HTTP handlers, one module per resource.

pub mod application;
pub mod manager;
pub mod property;
pub mod tenant;
