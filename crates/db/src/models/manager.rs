//! Manager entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stayio_core::types::{DbId, Timestamp};

/// A row from the `managers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: DbId,
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new manager.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateManager {
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

/// DTO for updating a manager's contact details.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateManager {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}
