//! Event model.

use serde::Serialize;
use sqlx::FromRow;
use volunteer_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
}
