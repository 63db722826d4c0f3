//! ID-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stayio_core::error::CoreError;
use stayio_core::roles::Role;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a Bearer ID token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(cognito_id = %user.cognito_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity provider's user id (`claims.sub`).
    pub cognito_id: String,
    /// Role chosen at sign-up.
    pub role: Role,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl AuthUser {
    /// Reject access to another user's record.
    pub fn ensure_self(&self, cognito_id: &str) -> Result<(), AppError> {
        if self.cognito_id != cognito_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot access another user's record".into(),
            )));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected ID token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let role = claims
            .role
            .as_deref()
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("Account has no role assigned".into()))
            })?
            .parse::<Role>()
            .map_err(|_| {
                AppError::Core(CoreError::Forbidden("Account role is not recognised".into()))
            })?;

        Ok(AuthUser {
            cognito_id: claims.sub,
            role,
            email: claims.email,
            username: claims.username,
        })
    }
}
