use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::PhotoStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stayio_db::DbPool,
    /// Server configuration (token validation, limits).
    pub config: Arc<ServerConfig>,
    /// Listing photo storage.
    pub storage: Arc<PhotoStorage>,
}
