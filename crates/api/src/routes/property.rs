use axum::routing::get;
use axum::Router;

use crate::handlers::property;
use crate::state::AppState;

/// Listing routes mounted at `/properties`.
///
/// ```text
/// GET    /       -> search_properties (public)
/// POST   /       -> create_property (manager, multipart)
/// GET    /{id}   -> get_property (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(property::search_properties).post(property::create_property),
        )
        .route("/{id}", get(property::get_property))
}
