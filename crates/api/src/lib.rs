//! STAYIO API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! photo storage) so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
