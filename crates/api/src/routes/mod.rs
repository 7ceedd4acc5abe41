pub mod health;
pub mod volunteer_project;
pub mod volunteer_project_contact;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /volunteer-projects                              list, create
/// /volunteer-projects/active                       active flag by entity
/// /volunteer-projects/{id}                         get (with entity dates)
/// /volunteer-projects/{id}/needs                   visible needs
/// /volunteer-projects/{id}/open-needs              needs still open
/// /volunteer-projects/{id}/roles                   distinct role labels
/// /volunteer-projects/{id}/flexible-need           single flexible need id
/// /volunteer-projects/{id}/contacts                contacts by relationship
///
/// /volunteer-project-contacts                      list, create
/// /volunteer-project-contacts/{id}                 delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/volunteer-projects", volunteer_project::router())
        .nest(
            "/volunteer-project-contacts",
            volunteer_project_contact::router(),
        )
}
