//! Repository for the `applications` table.

use sqlx::PgPool;
use stayio_core::application::STATUS_PENDING;
use stayio_core::types::DbId;

use crate::models::application::{Application, CreateApplication};

/// Select list over `applications a JOIN properties p`.
const SELECT_COLUMNS: &str = "a.id, a.application_date, a.status, a.property_id, \
     p.name AS property_name, p.manager_cognito_id, a.tenant_cognito_id, a.name, \
     a.email, a.phone_number, a.message, a.created_at, a.updated_at";

/// Provides create, query and status operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application in `Pending` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                INSERT INTO applications
                    (status, property_id, tenant_cognito_id, name, email, phone_number, message)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
             )
             SELECT {SELECT_COLUMNS} FROM a JOIN properties p ON p.id = a.property_id"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(STATUS_PENDING)
            .bind(input.property_id)
            .bind(&input.tenant_cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM applications a
             JOIN properties p ON p.id = a.property_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Applications submitted by a tenant, newest first.
    pub async fn list_by_tenant(
        pool: &PgPool,
        tenant_cognito_id: &str,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM applications a
             JOIN properties p ON p.id = a.property_id
             WHERE a.tenant_cognito_id = $1
             ORDER BY a.application_date DESC, a.id DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(tenant_cognito_id)
            .fetch_all(pool)
            .await
    }

    /// Applications against any listing owned by a manager, newest first.
    pub async fn list_by_manager(
        pool: &PgPool,
        manager_cognito_id: &str,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM applications a
             JOIN properties p ON p.id = a.property_id
             WHERE p.manager_cognito_id = $1
             ORDER BY a.application_date DESC, a.id DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(manager_cognito_id)
            .fetch_all(pool)
            .await
    }

    /// Set an application's status. Returns `None` if the application does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                UPDATE applications SET status = $2 WHERE id = $1 RETURNING *
             )
             SELECT {SELECT_COLUMNS} FROM a JOIN properties p ON p.id = a.property_id"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
