//! Volunteer project model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use volunteer_core::types::{DbId, Timestamp};

/// A row from the `volunteer_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub entity_table: String,
    pub entity_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub entity_table: String,
    pub entity_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// DTO for updating a project. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub entity_table: Option<String>,
    pub entity_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// A project insert or partial update, saved together with its contact links.
#[derive(Debug, Clone)]
pub enum ProjectWrite {
    Create(CreateProject),
    Update(DbId, UpdateProject),
}

/// Column filters for listing projects. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub id: Option<DbId>,
    pub entity_id: Option<DbId>,
    pub entity_table: Option<String>,
    pub title: Option<String>,
    pub is_active: Option<bool>,
    /// Restrict to this set of project ids.
    pub ids: Option<Vec<DbId>>,
}

impl ProjectFilter {
    /// Returns `true` if `project` satisfies every set filter.
    pub fn matches(&self, project: &Project) -> bool {
        self.id.map_or(true, |id| project.id == id)
            && self.entity_id.map_or(true, |id| project.entity_id == id)
            && self
                .entity_table
                .as_deref()
                .map_or(true, |t| project.entity_table == t)
            && self.title.as_deref().map_or(true, |t| project.title == t)
            && self.is_active.map_or(true, |a| project.is_active == a)
            && self.ids.as_ref().map_or(true, |ids| ids.contains(&project.id))
    }
}
