use axum::routing::{get, put};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Application routes mounted at `/applications`.
///
/// ```text
/// GET    /              -> list_applications
/// POST   /              -> create_application (tenant)
/// PUT    /{id}/status   -> update_application_status (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(application::list_applications).post(application::create_application),
        )
        .route("/{id}/status", put(application::update_application_status))
}
