//! Volunteer need model.

use serde::Serialize;
use sqlx::FromRow;
use volunteer_core::types::{DbId, Timestamp};

/// A row from the `volunteer_needs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Need {
    pub id: DbId,
    pub project_id: DbId,
    pub role_id: Option<DbId>,
    pub is_flexible: bool,
    pub start_time: Option<Timestamp>,
    /// Length of the shift in minutes.
    pub duration: Option<i32>,
    pub quantity: Option<i32>,
    pub visibility_id: DbId,
    pub is_active: bool,
}

/// DTO for creating a need.
#[derive(Debug, Clone)]
pub struct CreateNeed {
    pub project_id: DbId,
    pub role_id: Option<DbId>,
    pub is_flexible: bool,
    pub start_time: Option<Timestamp>,
    pub duration: Option<i32>,
    pub quantity: Option<i32>,
    pub visibility_id: DbId,
    pub is_active: bool,
}
