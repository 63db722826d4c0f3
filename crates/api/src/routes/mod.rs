pub mod application;
pub mod health;
pub mod manager;
pub mod property;
pub mod tenant;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /managers                                      create (manager)
/// /managers/{cognitoId}                          get, update (manager, self)
/// /managers/{cognitoId}/properties               manager's listings (manager, self)
///
/// /tenants                                       create (tenant)
/// /tenants/{cognitoId}                           get, update (tenant, self)
/// /tenants/{cognitoId}/favorites/{propertyId}    add, remove (tenant, self)
///
/// /properties                                    search (public), create (manager, multipart)
/// /properties/{id}                               get (public)
///
/// /applications                                  list (scoped by role), create (tenant)
/// /applications/{id}/status                      update (owning manager)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/managers", manager::router())
        .nest("/tenants", tenant::router())
        .nest("/properties", property::router())
        .nest("/applications", application::router())
}
