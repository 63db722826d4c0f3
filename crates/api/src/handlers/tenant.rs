//! Handlers for tenant records and favourites.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stayio_core::error::CoreError;
use stayio_core::forms::{Registration, SettingsForm};
use stayio_core::types::DbId;
use stayio_db::models::tenant::{CreateTenant, Tenant, UpdateTenant};
use stayio_db::repositories::{PropertyRepo, TenantRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireTenant;
use crate::state::AppState;

async fn load_tenant(pool: &sqlx::PgPool, cognito_id: &str) -> AppResult<Tenant> {
    TenantRepo::find_by_cognito_id(pool, cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tenant", cognito_id)))
}

/// GET /api/v1/tenants/{cognitoId}
pub async fn get_tenant(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    AppPath(cognito_id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;
    let tenant = load_tenant(&state.pool, &cognito_id).await?;
    Ok(Json(tenant))
}

/// POST /api/v1/tenants
pub async fn create_tenant(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    AppJson(input): AppJson<Registration>,
) -> AppResult<impl IntoResponse> {
    input.check()?;
    user.ensure_self(&input.cognito_id)?;

    let tenant = TenantRepo::create(
        &state.pool,
        &CreateTenant {
            cognito_id: input.cognito_id,
            name: input.name,
            email: input.email,
            phone_number: input.phone_number,
        },
    )
    .await?;

    tracing::info!(
        tenant_id = tenant.id,
        cognito_id = %tenant.cognito_id,
        "Tenant created",
    );

    Ok((StatusCode::CREATED, Json(tenant)))
}

/// PUT /api/v1/tenants/{cognitoId}
pub async fn update_tenant(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    AppPath(cognito_id): AppPath<String>,
    AppJson(input): AppJson<SettingsForm>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;
    input.check()?;

    let tenant = TenantRepo::update(
        &state.pool,
        &cognito_id,
        &UpdateTenant {
            name: input.name,
            email: input.email,
            phone_number: input.phone_number,
        },
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Tenant", &cognito_id)))?;

    tracing::info!(cognito_id = %cognito_id, "Tenant settings updated");

    Ok(Json(tenant))
}

/// POST /api/v1/tenants/{cognitoId}/favorites/{propertyId}
///
/// Adding a listing that is already a favourite is a no-op.
pub async fn add_favorite(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    AppPath((cognito_id, property_id)): AppPath<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;
    load_tenant(&state.pool, &cognito_id).await?;

    if PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("Property", property_id)));
    }

    TenantRepo::add_favorite(&state.pool, &cognito_id, property_id).await?;
    tracing::info!(cognito_id = %cognito_id, property_id, "Favourite added");

    let tenant = load_tenant(&state.pool, &cognito_id).await?;
    Ok(Json(tenant))
}

/// DELETE /api/v1/tenants/{cognitoId}/favorites/{propertyId}
///
/// Removing a listing that is not a favourite still returns the tenant.
pub async fn remove_favorite(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    AppPath((cognito_id, property_id)): AppPath<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;
    load_tenant(&state.pool, &cognito_id).await?;

    let removed = TenantRepo::remove_favorite(&state.pool, &cognito_id, property_id).await?;
    tracing::info!(cognito_id = %cognito_id, property_id, removed, "Favourite removed");

    let tenant = load_tenant(&state.pool, &cognito_id).await?;
    Ok(Json(tenant))
}
