//! Repository for the `volunteer_project_contacts` table.

use sqlx::{PgExecutor, PgPool};
use volunteer_core::types::DbId;

use crate::models::project_contact::{
    CreateProjectContact, ProjectContact, ProjectContactFilter, UpdateProjectContact,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, contact_id, relationship_type_id, created_at, updated_at";

/// Provides CRUD operations for project contacts.
pub struct ProjectContactRepo;

impl ProjectContactRepo {
    /// Insert a new project contact, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProjectContact,
    ) -> Result<ProjectContact, sqlx::Error> {
        let query = format!(
            "INSERT INTO volunteer_project_contacts (project_id, contact_id, relationship_type_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectContact>(&query)
            .bind(input.project_id)
            .bind(input.contact_id)
            .bind(input.relationship_type_id)
            .fetch_one(executor)
            .await
    }

    /// Update a project contact. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProjectContact,
    ) -> Result<Option<ProjectContact>, sqlx::Error> {
        let query = format!(
            "UPDATE volunteer_project_contacts SET
                project_id = COALESCE($2, project_id),
                contact_id = COALESCE($3, contact_id),
                relationship_type_id = COALESCE($4, relationship_type_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectContact>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.contact_id)
            .bind(input.relationship_type_id)
            .fetch_optional(pool)
            .await
    }

    /// List project contacts matching every set filter, ordered by ID.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectContactFilter,
    ) -> Result<Vec<ProjectContact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM volunteer_project_contacts
             WHERE ($1::BIGINT IS NULL OR id = $1)
               AND ($2::BIGINT IS NULL OR project_id = $2)
               AND ($3::BIGINT[] IS NULL OR contact_id = ANY($3))
               AND ($4::BIGINT IS NULL OR relationship_type_id = $4)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, ProjectContact>(&query)
            .bind(filter.id)
            .bind(filter.project_id)
            .bind(&filter.contact_ids)
            .bind(filter.relationship_type_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a project contact by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM volunteer_project_contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
