//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. Use these in route handlers to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stayio_core::error::CoreError;
use stayio_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `manager` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn managers_only(RequireManager(user): RequireManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Manager {
            return Err(AppError::Core(CoreError::Forbidden(
                "Manager role required".into(),
            )));
        }
        Ok(RequireManager(user))
    }
}

/// Requires the `tenant` role. Rejects with 403 Forbidden otherwise.
pub struct RequireTenant(pub AuthUser);

impl FromRequestParts<AppState> for RequireTenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Tenant {
            return Err(AppError::Core(CoreError::Forbidden(
                "Tenant role required".into(),
            )));
        }
        Ok(RequireTenant(user))
    }
}
