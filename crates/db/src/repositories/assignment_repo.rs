//! Repository for the `volunteer_assignments` table.

use sqlx::PgPool;
use volunteer_core::need::assignment_status;
use volunteer_core::types::DbId;

use crate::models::assignment::Assignment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, need_id, contact_id, status, created_at";

/// Provides data access for volunteer assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Assign a contact to a need with the given status.
    pub async fn create(
        pool: &PgPool,
        need_id: DbId,
        contact_id: DbId,
        status: &str,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO volunteer_assignments (need_id, contact_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(need_id)
            .bind(contact_id)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Count the assignments that currently fill a need (not cancelled).
    pub async fn count_current(pool: &PgPool, need_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM volunteer_assignments WHERE need_id = $1 AND status <> $2",
        )
        .bind(need_id)
        .bind(assignment_status::CANCELLED)
        .fetch_one(pool)
        .await
    }
}
