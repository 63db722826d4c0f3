//! Handlers for listing search, lookup and creation.

use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{Map, Value};
use stayio_core::error::CoreError;
use stayio_core::forms::PropertyDetails;
use stayio_core::params::clean_params;
use stayio_core::property::validate_photo_count;
use stayio_core::search::PropertyFilter;
use stayio_core::types::DbId;
use stayio_db::models::property::CreateProperty;
use stayio_db::repositories::{ManagerRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireManager;
use crate::state::AppState;

/// Multipart part name carrying photo bytes. May repeat.
const PHOTOS_FIELD: &str = "photos";
/// Multipart part naming the owning manager.
const MANAGER_FIELD: &str = "managerCognitoId";

/// GET /api/v1/properties
///
/// Public search. Placeholder values (`any`, blanks) are dropped before the
/// filters are parsed.
pub async fn search_properties(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let raw: Map<String, Value> = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let filter = PropertyFilter::from_params(&clean_params(raw))?;

    let properties = PropertyRepo::search(&state.pool, &filter).await?;
    tracing::debug!(count = properties.len(), ?filter, "Property search");

    Ok(Json(properties))
}

/// GET /api/v1/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", id)))?;
    Ok(Json(property))
}

/// POST /api/v1/properties
///
/// Multipart listing submission: text fields for the details, repeated
/// `photos` parts for the images. Photos are written before the row is
/// inserted and removed again if the insert fails.
pub async fn create_property(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut photos: Vec<Vec<u8>> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PHOTOS_FIELD {
            let data = field.bytes().await?;
            if !data.is_empty() {
                photos.push(data.to_vec());
            }
        } else {
            let text = field.text().await?;
            fields.insert(name, text);
        }
    }

    let manager_cognito_id = match fields.get(MANAGER_FIELD).map(|v| v.trim()) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => user.cognito_id.clone(),
    };
    user.ensure_self(&manager_cognito_id)?;

    let details = PropertyDetails::from_form_fields(&fields)?;
    details.check()?;
    validate_photo_count(photos.len())?;

    if ManagerRepo::find_by_cognito_id(&state.pool, &manager_cognito_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found(
            "Manager",
            &manager_cognito_id,
        )));
    }

    let stored = state.storage.store_all(&photos).await?;

    let input = CreateProperty {
        details,
        photo_urls: stored.iter().map(|p| p.url.clone()).collect(),
        manager_cognito_id,
    };

    let property = match PropertyRepo::create(&state.pool, &input).await {
        Ok(property) => property,
        Err(e) => {
            state.storage.remove_all(&stored).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        property_id = property.id,
        manager = %property.manager_cognito_id,
        photos = property.photo_urls.len(),
        "Property created",
    );

    Ok((StatusCode::CREATED, Json(property)))
}
