use axum::routing::{get, post};
use axum::Router;

use crate::handlers::manager;
use crate::state::AppState;

/// Manager routes mounted at `/managers`.
///
/// ```text
/// POST   /                         -> create_manager
/// GET    /{cognitoId}              -> get_manager
/// PUT    /{cognitoId}              -> update_manager
/// GET    /{cognitoId}/properties   -> list_manager_properties
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(manager::create_manager))
        .route(
            "/{cognito_id}",
            get(manager::get_manager).put(manager::update_manager),
        )
        .route(
            "/{cognito_id}/properties",
            get(manager::list_manager_properties),
        )
}
