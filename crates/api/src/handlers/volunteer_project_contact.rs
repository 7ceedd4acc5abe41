//! Handlers for the `/volunteer-project-contacts` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use volunteer_core::types::DbId;
use volunteer_db::models::project_contact::ProjectContact;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireCoordinator};
use crate::query::{body_params, query_params};
use crate::response::ValuesResponse;
use crate::state::AppState;
use crate::volunteer::project_contact::ProjectContactRecord;

/// POST /api/v1/volunteer-project-contacts
///
/// Creates a link, or updates the one named by `id` in the body.
pub async fn create(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<ValuesResponse<ProjectContact>>)> {
    let params = body_params(body)?;
    let contact = state.project_contacts().create(&params).await?;
    tracing::debug!(by = user.contact_id, id = contact.id, "Saved project contact");
    Ok((StatusCode::CREATED, Json(ValuesResponse::single(contact))))
}

/// GET /api/v1/volunteer-project-contacts
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<HashMap<String, String>>,
) -> AppResult<Json<ValuesResponse<Vec<ProjectContactRecord>>>> {
    let params = query_params(query)?;
    let records = state.project_contacts().get(&params).await?;
    Ok(Json(ValuesResponse::list(records)))
}

/// DELETE /api/v1/volunteer-project-contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCoordinator(_user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let params = body_params(json!({ "id": id }))?;
    state.project_contacts().delete(&params).await?;
    Ok(StatusCode::NO_CONTENT)
}
