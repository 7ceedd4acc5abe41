//! Route definitions for the `/volunteer-projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::volunteer_project;
use crate::state::AppState;

/// Routes mounted at `/volunteer-projects`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /active                 -> is_active
/// GET    /{id}                   -> get_by_id
/// GET    /{id}/needs             -> needs
/// GET    /{id}/open-needs        -> open_needs
/// GET    /{id}/roles             -> roles
/// GET    /{id}/flexible-need     -> flexible_need
/// GET    /{id}/contacts          -> contacts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(volunteer_project::list).post(volunteer_project::create),
        )
        .route("/active", get(volunteer_project::is_active))
        .route("/{id}", get(volunteer_project::get_by_id))
        .route("/{id}/needs", get(volunteer_project::needs))
        .route("/{id}/open-needs", get(volunteer_project::open_needs))
        .route("/{id}/roles", get(volunteer_project::roles))
        .route("/{id}/flexible-need", get(volunteer_project::flexible_need))
        .route("/{id}/contacts", get(volunteer_project::contacts))
}
