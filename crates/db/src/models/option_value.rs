//! Option value model.

use serde::Serialize;
use sqlx::FromRow;
use volunteer_core::types::DbId;

/// A row from the `option_values` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OptionValue {
    pub id: DbId,
    pub option_group: String,
    pub value: String,
    pub name: String,
    pub label: String,
    pub weight: i32,
    pub is_active: bool,
}
