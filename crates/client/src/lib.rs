//! Typed client for the STAYIO API.
//!
//! Carries the behaviour a front end needs around the REST API: identity
//! provider configuration, role-based navigation, validated form
//! submission, and user-facing error feedback.

pub mod api;
pub mod error;
pub mod feedback;
pub mod guard;
pub mod identity;
pub mod models;

pub use api::ApiClient;
pub use error::ClientError;
