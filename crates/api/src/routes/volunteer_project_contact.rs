//! Route definitions for the `/volunteer-project-contacts` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::volunteer_project_contact;
use crate::state::AppState;

/// Routes mounted at `/volunteer-project-contacts`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (coordinator or admin)
/// DELETE /{id}    -> delete (coordinator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(volunteer_project_contact::list).post(volunteer_project_contact::create),
        )
        .route("/{id}", delete(volunteer_project_contact::delete))
}
