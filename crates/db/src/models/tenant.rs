//! Tenant entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stayio_core::types::{DbId, Timestamp};

/// A row from the `tenants` table joined with the tenant's favourite listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: DbId,
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    /// Ids of favourited properties, ascending.
    pub favorites: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTenant {
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTenant {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}
