//! Repository for the `tenants` table and its `tenant_favorites` join table.

use sqlx::PgPool;
use stayio_core::types::DbId;

use crate::models::tenant::{CreateTenant, Tenant, UpdateTenant};

/// Select list over an alias `t`, aggregating favourites into an array.
const SELECT_COLUMNS: &str = "t.id, t.cognito_id, t.name, t.email, t.phone_number, \
     ARRAY(SELECT f.property_id FROM tenant_favorites f \
           WHERE f.tenant_cognito_id = t.cognito_id ORDER BY f.property_id) AS favorites, \
     t.created_at, t.updated_at";

/// Provides CRUD operations for tenants and their favourites.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTenant) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                INSERT INTO tenants (cognito_id, name, email, phone_number)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {SELECT_COLUMNS} FROM t"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(&input.cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_one(pool)
            .await
    }

    /// Find a tenant by the identity provider's user id.
    pub async fn find_by_cognito_id(
        pool: &PgPool,
        cognito_id: &str,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM tenants t WHERE t.cognito_id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(cognito_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a tenant's contact details. Returns `None` if the tenant does not exist.
    pub async fn update(
        pool: &PgPool,
        cognito_id: &str,
        input: &UpdateTenant,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                UPDATE tenants SET name = $2, email = $3, phone_number = $4
                WHERE cognito_id = $1
                RETURNING *
             )
             SELECT {SELECT_COLUMNS} FROM t"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_optional(pool)
            .await
    }

    /// Mark a property as a favourite. Adding an existing favourite is a no-op.
    pub async fn add_favorite(
        pool: &PgPool,
        cognito_id: &str,
        property_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tenant_favorites (tenant_cognito_id, property_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(cognito_id)
        .bind(property_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a favourite. Returns `true` if a row was removed.
    pub async fn remove_favorite(
        pool: &PgPool,
        cognito_id: &str,
        property_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM tenant_favorites WHERE tenant_cognito_id = $1 AND property_id = $2",
        )
        .bind(cognito_id)
        .bind(property_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
