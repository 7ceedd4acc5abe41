//! Storage seam for the volunteer domain layer.
//!
//! The domain types in `volunteer_api` hold an `Arc<dyn VolunteerStore>`
//! instead of reaching for a pool directly, so they can run against
//! PostgreSQL in production and an in-memory store in tests.

use async_trait::async_trait;
use volunteer_core::types::DbId;

use crate::models::event::Event;
use crate::models::need::Need;
use crate::models::option_value::OptionValue;
use crate::models::project::{Project, ProjectFilter, ProjectWrite};
use crate::models::project_contact::{
    ContactLink, CreateProjectContact, ProjectContact, ProjectContactFilter, UpdateProjectContact,
};
use crate::repositories::{
    AssignmentRepo, EventRepo, NeedRepo, OptionValueRepo, ProjectContactRepo, ProjectRepo,
};
use crate::DbPool;

/// Record operations the volunteer domain layer depends on.
#[async_trait]
pub trait VolunteerStore: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;

    // --- Projects ---

    /// Write a project and link `contacts` to it as one atomic unit.
    ///
    /// Returns `None`, having written nothing, if an update targets a
    /// missing project.
    async fn save_project(
        &self,
        write: &ProjectWrite,
        contacts: &[ContactLink],
    ) -> Result<Option<(Project, Vec<ProjectContact>)>, sqlx::Error>;

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error>;

    // --- Project contacts ---

    async fn insert_project_contact(
        &self,
        input: &CreateProjectContact,
    ) -> Result<ProjectContact, sqlx::Error>;

    async fn update_project_contact(
        &self,
        id: DbId,
        input: &UpdateProjectContact,
    ) -> Result<Option<ProjectContact>, sqlx::Error>;

    async fn list_project_contacts(
        &self,
        filter: &ProjectContactFilter,
    ) -> Result<Vec<ProjectContact>, sqlx::Error>;

    async fn delete_project_contact(&self, id: DbId) -> Result<bool, sqlx::Error>;

    // --- Needs and assignments ---

    /// Active needs of a project with the given visibility, by start time.
    async fn list_visible_needs(
        &self,
        project_id: DbId,
        visibility_id: DbId,
    ) -> Result<Vec<Need>, sqlx::Error>;

    /// Number of non-cancelled assignments for a need.
    async fn count_assignments(&self, need_id: DbId) -> Result<i64, sqlx::Error>;

    async fn list_active_flexible_need_ids(
        &self,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error>;

    // --- Related entities ---

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, sqlx::Error>;

    // --- Option values ---

    async fn find_option_values(
        &self,
        group: &str,
        value: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error>;

    async fn find_option_values_by_name(
        &self,
        group: &str,
        name: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error>;
}

/// [`VolunteerStore`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgVolunteerStore {
    pool: DbPool,
}

impl PgVolunteerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VolunteerStore for PgVolunteerStore {
    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn save_project(
        &self,
        write: &ProjectWrite,
        contacts: &[ContactLink],
    ) -> Result<Option<(Project, Vec<ProjectContact>)>, sqlx::Error> {
        ProjectRepo::save_with_contacts(&self.pool, write, contacts).await
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        ProjectRepo::list(&self.pool, filter).await
    }

    async fn insert_project_contact(
        &self,
        input: &CreateProjectContact,
    ) -> Result<ProjectContact, sqlx::Error> {
        ProjectContactRepo::create(&self.pool, input).await
    }

    async fn update_project_contact(
        &self,
        id: DbId,
        input: &UpdateProjectContact,
    ) -> Result<Option<ProjectContact>, sqlx::Error> {
        ProjectContactRepo::update(&self.pool, id, input).await
    }

    async fn list_project_contacts(
        &self,
        filter: &ProjectContactFilter,
    ) -> Result<Vec<ProjectContact>, sqlx::Error> {
        ProjectContactRepo::list(&self.pool, filter).await
    }

    async fn delete_project_contact(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ProjectContactRepo::delete(&self.pool, id).await
    }

    async fn list_visible_needs(
        &self,
        project_id: DbId,
        visibility_id: DbId,
    ) -> Result<Vec<Need>, sqlx::Error> {
        NeedRepo::list_active_by_visibility(&self.pool, project_id, visibility_id).await
    }

    async fn count_assignments(&self, need_id: DbId) -> Result<i64, sqlx::Error> {
        AssignmentRepo::count_current(&self.pool, need_id).await
    }

    async fn list_active_flexible_need_ids(
        &self,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        NeedRepo::list_active_flexible_ids(&self.pool, project_id).await
    }

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        EventRepo::find_by_id(&self.pool, id).await
    }

    async fn find_option_values(
        &self,
        group: &str,
        value: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error> {
        OptionValueRepo::list_by_value(&self.pool, group, value).await
    }

    async fn find_option_values_by_name(
        &self,
        group: &str,
        name: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error> {
        OptionValueRepo::list_by_name(&self.pool, group, name).await
    }
}
