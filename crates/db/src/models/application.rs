//! Rental application entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stayio_core::types::{DbId, Timestamp};

/// A row from the `applications` table joined with its listing's name and owner.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: DbId,
    pub application_date: Timestamp,
    pub status: String,
    pub property_id: DbId,
    pub property_name: String,
    pub manager_cognito_id: String,
    pub tenant_cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a tenant's submission. Status always starts as `Pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplication {
    pub property_id: DbId,
    pub tenant_cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
}
