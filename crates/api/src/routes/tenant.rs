use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tenant;
use crate::state::AppState;

/// Tenant routes mounted at `/tenants`.
///
/// ```text
/// POST   /                                     -> create_tenant
/// GET    /{cognitoId}                          -> get_tenant
/// PUT    /{cognitoId}                          -> update_tenant
/// POST   /{cognitoId}/favorites/{propertyId}   -> add_favorite
/// DELETE /{cognitoId}/favorites/{propertyId}   -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(tenant::create_tenant))
        .route(
            "/{cognito_id}",
            get(tenant::get_tenant).put(tenant::update_tenant),
        )
        .route(
            "/{cognito_id}/favorites/{property_id}",
            post(tenant::add_favorite).delete(tenant::remove_favorite),
        )
}
