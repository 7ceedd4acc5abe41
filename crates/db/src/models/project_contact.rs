//! Project contact model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;
use volunteer_core::types::{DbId, Timestamp};

/// A row from the `volunteer_project_contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectContact {
    pub id: DbId,
    pub project_id: DbId,
    pub contact_id: DbId,
    pub relationship_type_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for linking a contact to a project.
#[derive(Debug, Clone, Validate)]
pub struct CreateProjectContact {
    #[validate(range(min = 1))]
    pub project_id: DbId,
    #[validate(range(min = 1))]
    pub contact_id: DbId,
    #[validate(range(min = 1))]
    pub relationship_type_id: DbId,
}

/// A contact link written in the same transaction as its project, which
/// supplies the `project_id`.
#[derive(Debug, Clone, Validate)]
pub struct ContactLink {
    #[validate(range(min = 1))]
    pub contact_id: DbId,
    #[validate(range(min = 1))]
    pub relationship_type_id: DbId,
}

impl ContactLink {
    pub fn for_project(&self, project_id: DbId) -> CreateProjectContact {
        CreateProjectContact {
            project_id,
            contact_id: self.contact_id,
            relationship_type_id: self.relationship_type_id,
        }
    }
}

/// DTO for updating a project contact. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectContact {
    pub project_id: Option<DbId>,
    pub contact_id: Option<DbId>,
    pub relationship_type_id: Option<DbId>,
}

/// Filters for listing project contacts. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct ProjectContactFilter {
    pub id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub contact_ids: Option<Vec<DbId>>,
    pub relationship_type_id: Option<DbId>,
}

impl ProjectContactFilter {
    /// Returns `true` if `contact` satisfies every set filter.
    pub fn matches(&self, contact: &ProjectContact) -> bool {
        self.id.map_or(true, |id| contact.id == id)
            && self.project_id.map_or(true, |id| contact.project_id == id)
            && self
                .contact_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(&contact.contact_id))
            && self
                .relationship_type_id
                .map_or(true, |id| contact.relationship_type_id == id)
    }
}
