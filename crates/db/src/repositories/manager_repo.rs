//! Repository for the `managers` table.

use sqlx::PgPool;

use crate::models::manager::{CreateManager, Manager, UpdateManager};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, cognito_id, name, email, phone_number, created_at, updated_at";

/// Provides CRUD operations for managers.
pub struct ManagerRepo;

impl ManagerRepo {
    /// Insert a new manager, returning the created row.
    ///
    /// A duplicate `cognito_id` fails with the `uq_managers_cognito_id` constraint.
    pub async fn create(pool: &PgPool, input: &CreateManager) -> Result<Manager, sqlx::Error> {
        let query = format!(
            "INSERT INTO managers (cognito_id, name, email, phone_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manager>(&query)
            .bind(&input.cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_one(pool)
            .await
    }

    /// Find a manager by the identity provider's user id.
    pub async fn find_by_cognito_id(
        pool: &PgPool,
        cognito_id: &str,
    ) -> Result<Option<Manager>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM managers WHERE cognito_id = $1");
        sqlx::query_as::<_, Manager>(&query)
            .bind(cognito_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a manager's contact details.
    ///
    /// Returns `None` if no manager with the given `cognito_id` exists.
    pub async fn update(
        pool: &PgPool,
        cognito_id: &str,
        input: &UpdateManager,
    ) -> Result<Option<Manager>, sqlx::Error> {
        let query = format!(
            "UPDATE managers SET name = $2, email = $3, phone_number = $4
             WHERE cognito_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manager>(&query)
            .bind(cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_optional(pool)
            .await
    }
}
