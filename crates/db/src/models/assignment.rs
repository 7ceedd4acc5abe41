//! Volunteer assignment model.

use serde::Serialize;
use sqlx::FromRow;
use volunteer_core::types::{DbId, Timestamp};

/// A row from the `volunteer_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub need_id: DbId,
    pub contact_id: DbId,
    /// One of `volunteer_core::need::assignment_status`.
    pub status: String,
    pub created_at: Timestamp,
}
