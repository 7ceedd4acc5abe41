//! Handlers for the `/volunteer-projects` resource.

use std::collections::{BTreeMap, HashMap};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use volunteer_core::need::RoleLabel;
use volunteer_core::project::RelationshipRef;
use volunteer_core::types::{DbId, Timestamp};
use volunteer_db::models::project::Project;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::query::{body_params, query_params, ActiveParams, RelationshipParams};
use crate::response::ValuesResponse;
use crate::state::AppState;
use crate::volunteer::project::{OpenNeed, ProjectNeed};

/// A project with the dates of the entity it is attached to.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// POST /api/v1/volunteer-projects
///
/// Always checks the caller's permission to add or update.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<ValuesResponse<Project>>)> {
    let mut params = body_params(body)?;
    params.insert("check_permissions".into(), Value::Bool(true));

    let project = state.projects().create(params, Some(user.role.as_str())).await?;
    Ok((
        StatusCode::CREATED,
        Json(ValuesResponse::single(project.into_record())),
    ))
}

/// GET /api/v1/volunteer-projects
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<HashMap<String, String>>,
) -> AppResult<Json<ValuesResponse<BTreeMap<DbId, Project>>>> {
    let params = query_params(query)?;
    let projects = state
        .projects()
        .retrieve(params)
        .await?
        .into_iter()
        .map(|(id, project)| (id, project.into_record()))
        .collect();
    Ok(Json(ValuesResponse::map(projects)))
}

/// GET /api/v1/volunteer-projects/active?entity_id=&entity_table=
pub async fn is_active(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ActiveParams>,
) -> AppResult<Json<ValuesResponse<Option<bool>>>> {
    let active = state
        .projects()
        .is_active(query.entity_id, &query.entity_table)
        .await?;
    Ok(Json(ValuesResponse::single(active)))
}

/// GET /api/v1/volunteer-projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValuesResponse<ProjectDetail>>> {
    let project = state.projects().retrieve_by_id(id).await?;
    let start_date = project.start_date().await?;
    let end_date = project.end_date().await?;
    Ok(Json(ValuesResponse::single(ProjectDetail {
        project: project.into_record(),
        start_date,
        end_date,
    })))
}

/// GET /api/v1/volunteer-projects/{id}/needs
pub async fn needs(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValuesResponse<Vec<ProjectNeed>>>> {
    let project = state.projects().retrieve_by_id(id).await?;
    let needs = project.needs().await?.to_vec();
    Ok(Json(ValuesResponse::list(needs)))
}

/// GET /api/v1/volunteer-projects/{id}/open-needs
pub async fn open_needs(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValuesResponse<Vec<OpenNeed>>>> {
    let project = state.projects().retrieve_by_id(id).await?;
    let open = project.open_needs().await?.to_vec();
    Ok(Json(ValuesResponse::list(open)))
}

/// GET /api/v1/volunteer-projects/{id}/roles
pub async fn roles(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValuesResponse<Vec<RoleLabel>>>> {
    let project = state.projects().retrieve_by_id(id).await?;
    let roles = project.roles().await?.to_vec();
    Ok(Json(ValuesResponse::list(roles)))
}

/// GET /api/v1/volunteer-projects/{id}/flexible-need
pub async fn flexible_need(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ValuesResponse<Option<DbId>>>> {
    let project = state.projects().retrieve_by_id(id).await?;
    let need_id = project.flexible_need_id().await?;
    Ok(Json(ValuesResponse::single(need_id)))
}

/// GET /api/v1/volunteer-projects/{id}/contacts?relationship_type=
pub async fn contacts(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Query(query): Query<RelationshipParams>,
) -> AppResult<Json<ValuesResponse<Vec<DbId>>>> {
    let relationship = RelationshipRef::parse(&query.relationship_type);
    let contact_ids = state
        .projects()
        .contacts_by_relationship(id, &relationship)
        .await?;
    Ok(Json(ValuesResponse::list(contact_ids)))
}
