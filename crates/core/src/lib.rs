//! Domain rules shared by the STAYIO server and client.
//!
//! Nothing in this crate touches the database or the network: it holds the
//! enumerations, form schemas, search-parameter parsing and small
//! presentation helpers that both sides agree on.

pub mod application;
pub mod error;
pub mod formatting;
pub mod forms;
pub mod messages;
pub mod params;
pub mod property;
pub mod roles;
pub mod search;
pub mod types;
