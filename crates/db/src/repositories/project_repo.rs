//! Repository for the `volunteer_projects` table.

use sqlx::{PgExecutor, PgPool};
use volunteer_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFilter, ProjectWrite, UpdateProject};
use crate::models::project_contact::{ContactLink, ProjectContact};
use crate::repositories::ProjectContactRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, entity_table, entity_id, title, description, is_active, created_at, updated_at";

/// Provides CRUD operations for volunteer projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO volunteer_projects (entity_table, entity_id, title, description, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.entity_table)
            .bind(input.entity_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM volunteer_projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching every set filter, ordered by ID ascending.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM volunteer_projects
             WHERE ($1::BIGINT IS NULL OR id = $1)
               AND ($2::BIGINT IS NULL OR entity_id = $2)
               AND ($3::TEXT IS NULL OR entity_table = $3)
               AND ($4::TEXT IS NULL OR title = $4)
               AND ($5::BOOL IS NULL OR is_active = $5)
               AND ($6::BIGINT[] IS NULL OR id = ANY($6))
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.id)
            .bind(filter.entity_id)
            .bind(&filter.entity_table)
            .bind(&filter.title)
            .bind(filter.is_active)
            .bind(&filter.ids)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE volunteer_projects SET
                entity_table = COALESCE($2, entity_table),
                entity_id = COALESCE($3, entity_id),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.entity_table)
            .bind(input.entity_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(executor)
            .await
    }

    /// Insert or update a project and link `contacts` to it.
    ///
    /// Runs in a transaction: either the project and every link are written,
    /// or nothing is. Returns `None` if an update targets a missing row.
    pub async fn save_with_contacts(
        pool: &PgPool,
        write: &ProjectWrite,
        contacts: &[ContactLink],
    ) -> Result<Option<(Project, Vec<ProjectContact>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project = match write {
            ProjectWrite::Create(input) => Self::create(&mut *tx, input).await?,
            ProjectWrite::Update(id, input) => match Self::update(&mut *tx, *id, input).await? {
                Some(project) => project,
                None => return Ok(None),
            },
        };

        let mut linked = Vec::with_capacity(contacts.len());
        for link in contacts {
            linked.push(ProjectContactRepo::create(&mut *tx, &link.for_project(project.id)).await?);
        }

        tx.commit().await?;
        Ok(Some((project, linked)))
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM volunteer_projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
