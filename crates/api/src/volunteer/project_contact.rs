//! Contact-to-project links.
//!
//! `create` inserts (or updates, when `id` is given), `get` lists with filters
//! and decorates each row with its relationship type label and name, and
//! `delete` removes by id.

use std::sync::Arc;

use serde::Serialize;
use validator::Validate;
use volunteer_core::error::CoreError;
use volunteer_core::option_group::RELATIONSHIP_OPTION_GROUP;
use volunteer_core::params::{has_value, id_list_param, id_param, Params};
use volunteer_core::project::RelationshipRef;
use volunteer_core::types::DbId;
use volunteer_db::models::project_contact::{
    CreateProjectContact, ProjectContact, ProjectContactFilter, UpdateProjectContact,
};
use volunteer_db::store::VolunteerStore;

use crate::error::AppResult;
use crate::volunteer::options;

/// Fields that must be present to create a project contact.
const REQUIRED_FIELDS: [&str; 3] = ["project_id", "contact_id", "relationship_type_id"];

/// A project contact as returned by [`ProjectContactApi::get`].
#[derive(Debug, Clone, Serialize)]
pub struct ProjectContactRecord {
    #[serde(flatten)]
    pub contact: ProjectContact,
    pub relationship_type_label: String,
    pub relationship_type_name: String,
}

/// Create/get/delete operations for project contacts.
#[derive(Clone)]
pub struct ProjectContactApi {
    store: Arc<dyn VolunteerStore>,
}

impl ProjectContactApi {
    pub fn new(store: Arc<dyn VolunteerStore>) -> Self {
        Self { store }
    }

    /// Create a project contact, or update one when `id` is given.
    ///
    /// Without `id`, `project_id`, `contact_id` and `relationship_type_id` are
    /// all required. The relationship type may be given by value or name.
    pub async fn create(&self, params: &Params) -> AppResult<ProjectContact> {
        let relationship_type_id = match params.get("relationship_type_id") {
            Some(v) if has_value(params, "relationship_type_id") => {
                let rel = RelationshipRef::from_value(v).ok_or_else(|| {
                    CoreError::Validation("relationship_type_id must be a value or name".into())
                })?;
                Some(self.resolve_relationship_type(&rel).await?)
            }
            _ => None,
        };

        if let Some(id) = id_param(params, "id")?.filter(|id| *id > 0) {
            let input = UpdateProjectContact {
                project_id: id_param(params, "project_id")?,
                contact_id: id_param(params, "contact_id")?,
                relationship_type_id,
            };
            let updated = self
                .store
                .update_project_contact(id, &input)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "ProjectContact",
                    id,
                })?;
            tracing::info!(id, project_id = updated.project_id, "Updated project contact");
            return Ok(updated);
        }

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !has_value(params, field))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Mandatory key(s) missing from params array: {}",
                missing.join(", ")
            ))
            .into());
        }

        let input = CreateProjectContact {
            project_id: id_param(params, "project_id")?.unwrap_or_default(),
            contact_id: id_param(params, "contact_id")?.unwrap_or_default(),
            relationship_type_id: relationship_type_id.unwrap_or_default(),
        };
        self.insert(&input).await
    }

    /// Insert a link from already-typed values.
    async fn insert(&self, input: &CreateProjectContact) -> AppResult<ProjectContact> {
        input.validate()?;
        let created = self.store.insert_project_contact(input).await?;
        tracing::info!(
            id = created.id,
            project_id = created.project_id,
            contact_id = created.contact_id,
            relationship_type_id = created.relationship_type_id,
            "Created project contact",
        );
        Ok(created)
    }

    /// List project contacts matching `params`, with relationship labels.
    ///
    /// Filters: `id`, `project_id`, `contact_id` (one id or a list),
    /// `relationship_type_id` (value or name). Fails if any row's
    /// relationship type does not resolve to exactly one option.
    pub async fn get(&self, params: &Params) -> AppResult<Vec<ProjectContactRecord>> {
        let relationship_type_id = match params.get("relationship_type_id") {
            Some(v) if has_value(params, "relationship_type_id") => {
                let rel = RelationshipRef::from_value(v).ok_or_else(|| {
                    CoreError::Validation("relationship_type_id must be a value or name".into())
                })?;
                Some(self.resolve_relationship_type(&rel).await?)
            }
            _ => None,
        };
        let filter = ProjectContactFilter {
            id: id_param(params, "id")?,
            project_id: id_param(params, "project_id")?,
            contact_ids: id_list_param(params, "contact_id")?,
            relationship_type_id,
        };
        self.list(&filter).await
    }

    /// List project contacts matching an already-typed filter, with labels.
    pub async fn list(
        &self,
        filter: &ProjectContactFilter,
    ) -> AppResult<Vec<ProjectContactRecord>> {
        let rows = self.store.list_project_contacts(filter).await?;

        let mut records = Vec::with_capacity(rows.len());
        for contact in rows {
            let option = options::get_single(
                self.store.as_ref(),
                RELATIONSHIP_OPTION_GROUP,
                &contact.relationship_type_id.to_string(),
            )
            .await?;
            records.push(ProjectContactRecord {
                contact,
                relationship_type_label: option.label,
                relationship_type_name: option.name,
            });
        }
        Ok(records)
    }

    /// Delete the project contact named by `params["id"]`.
    pub async fn delete(&self, params: &Params) -> AppResult<()> {
        let id = id_param(params, "id")?.ok_or_else(|| {
            CoreError::Validation("Mandatory key(s) missing from params array: id".into())
        })?;
        if !self.store.delete_project_contact(id).await? {
            return Err(CoreError::NotFound {
                entity: "ProjectContact",
                id,
            }
            .into());
        }
        tracing::info!(id, "Deleted project contact");
        Ok(())
    }

    /// Resolve a relationship type given by value or machine name to its id.
    ///
    /// Values are used as-is; names are looked up in the relationship group.
    pub async fn resolve_relationship_type(&self, rel: &RelationshipRef) -> AppResult<DbId> {
        match rel {
            RelationshipRef::Value(v) => Ok(*v),
            RelationshipRef::Name(name) => {
                let option = options::get_single_by_name(
                    self.store.as_ref(),
                    RELATIONSHIP_OPTION_GROUP,
                    name,
                )
                .await?;
                options::value_as_id(&option)
            }
        }
    }
}
