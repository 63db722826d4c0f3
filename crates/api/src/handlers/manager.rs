//! Handlers for manager records and a manager's own listings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stayio_core::error::CoreError;
use stayio_core::forms::{Registration, SettingsForm};
use stayio_db::models::manager::{CreateManager, UpdateManager};
use stayio_db::repositories::{ManagerRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireManager;
use crate::state::AppState;

/// GET /api/v1/managers/{cognitoId}
pub async fn get_manager(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    AppPath(cognito_id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;

    let manager = ManagerRepo::find_by_cognito_id(&state.pool, &cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Manager", &cognito_id)))?;

    Ok(Json(manager))
}

/// POST /api/v1/managers
///
/// Called once after sign-up. Contact fields may still be blank.
pub async fn create_manager(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    AppJson(input): AppJson<Registration>,
) -> AppResult<impl IntoResponse> {
    input.check()?;
    user.ensure_self(&input.cognito_id)?;

    let manager = ManagerRepo::create(
        &state.pool,
        &CreateManager {
            cognito_id: input.cognito_id,
            name: input.name,
            email: input.email,
            phone_number: input.phone_number,
        },
    )
    .await?;

    tracing::info!(
        manager_id = manager.id,
        cognito_id = %manager.cognito_id,
        "Manager created",
    );

    Ok((StatusCode::CREATED, Json(manager)))
}

/// PUT /api/v1/managers/{cognitoId}
pub async fn update_manager(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    AppPath(cognito_id): AppPath<String>,
    AppJson(input): AppJson<SettingsForm>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;
    input.check()?;

    let manager = ManagerRepo::update(
        &state.pool,
        &cognito_id,
        &UpdateManager {
            name: input.name,
            email: input.email,
            phone_number: input.phone_number,
        },
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Manager", &cognito_id)))?;

    tracing::info!(cognito_id = %cognito_id, "Manager settings updated");

    Ok(Json(manager))
}

/// GET /api/v1/managers/{cognitoId}/properties
///
/// The manager's listings, newest first.
pub async fn list_manager_properties(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    AppPath(cognito_id): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    user.ensure_self(&cognito_id)?;

    if ManagerRepo::find_by_cognito_id(&state.pool, &cognito_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("Manager", &cognito_id)));
    }

    let properties = PropertyRepo::list_by_manager(&state.pool, &cognito_id).await?;
    Ok(Json(properties))
}
