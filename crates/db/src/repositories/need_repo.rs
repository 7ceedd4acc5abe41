//! Repository for the `volunteer_needs` table.

use sqlx::PgPool;
use volunteer_core::types::DbId;

use crate::models::need::{CreateNeed, Need};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, role_id, is_flexible, start_time, duration, quantity, \
    visibility_id, is_active";

/// Provides data access for volunteer needs.
pub struct NeedRepo;

impl NeedRepo {
    /// Insert a new need, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNeed) -> Result<Need, sqlx::Error> {
        let query = format!(
            "INSERT INTO volunteer_needs
                (project_id, role_id, is_flexible, start_time, duration, quantity,
                 visibility_id, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Need>(&query)
            .bind(input.project_id)
            .bind(input.role_id)
            .bind(input.is_flexible)
            .bind(input.start_time)
            .bind(input.duration)
            .bind(input.quantity)
            .bind(input.visibility_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// List the active needs of a project with the given visibility.
    ///
    /// Ordered by start time ascending; flexible needs (no start time) first.
    pub async fn list_active_by_visibility(
        pool: &PgPool,
        project_id: DbId,
        visibility_id: DbId,
    ) -> Result<Vec<Need>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM volunteer_needs
             WHERE project_id = $1 AND visibility_id = $2 AND is_active = true
             ORDER BY start_time ASC NULLS FIRST, id ASC"
        );
        sqlx::query_as::<_, Need>(&query)
            .bind(project_id)
            .bind(visibility_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of the active flexible needs of a project.
    pub async fn list_active_flexible_ids(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM volunteer_needs
             WHERE project_id = $1 AND is_flexible = true AND is_active = true
             ORDER BY id ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
