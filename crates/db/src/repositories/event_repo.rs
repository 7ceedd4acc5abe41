//! Repository for the `events` table.

use sqlx::PgPool;
use volunteer_core::types::{DbId, Timestamp};

use crate::models::event::Event;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, start_date, end_date";

/// Provides data access for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        start_date: Timestamp,
        end_date: Option<Timestamp>,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, start_date, end_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(title)
            .bind(start_date)
            .bind(end_date)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
