//! Handlers for rental applications.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stayio_core::application::validate_status;
use stayio_core::error::CoreError;
use stayio_core::forms::ApplicationForm;
use stayio_core::roles::Role;
use stayio_core::types::DbId;
use stayio_db::models::application::CreateApplication;
use stayio_db::repositories::{ApplicationRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireManager, RequireTenant};
use crate::state::AppState;

/// Body of `POST /applications`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub property_id: DbId,
    #[serde(flatten)]
    pub form: ApplicationForm,
}

/// Body of `PUT /applications/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /api/v1/applications
pub async fn create_application(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    AppJson(input): AppJson<ApplicationRequest>,
) -> AppResult<impl IntoResponse> {
    input.form.check()?;

    if PropertyRepo::find_by_id(&state.pool, input.property_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found(
            "Property",
            input.property_id,
        )));
    }

    let form = input.form;
    let application = ApplicationRepo::create(
        &state.pool,
        &CreateApplication {
            property_id: input.property_id,
            tenant_cognito_id: user.cognito_id,
            name: form.name,
            email: form.email,
            phone_number: form.phone_number,
            message: form.message.filter(|m| !m.trim().is_empty()),
        },
    )
    .await?;

    tracing::info!(
        application_id = application.id,
        property_id = application.property_id,
        tenant = %application.tenant_cognito_id,
        "Application submitted",
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications
///
/// Tenants see what they submitted; managers see applications for their listings.
pub async fn list_applications(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let applications = match user.role {
        Role::Tenant => ApplicationRepo::list_by_tenant(&state.pool, &user.cognito_id).await?,
        Role::Manager => ApplicationRepo::list_by_manager(&state.pool, &user.cognito_id).await?,
    };
    Ok(Json(applications))
}

/// PUT /api/v1/applications/{id}/status
///
/// Only the manager who owns the listing may decide.
pub async fn update_application_status(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    validate_status(&input.status)?;

    let existing = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;

    if existing.manager_cognito_id != user.cognito_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the listing's manager can update this application".into(),
        )));
    }

    let application = ApplicationRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;

    tracing::info!(
        application_id = id,
        from = %existing.status,
        to = %application.status,
        "Application status updated",
    );

    Ok(Json(application))
}
