//! Repository for the `option_values` table.

use sqlx::PgPool;

use crate::models::option_value::OptionValue;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, option_group, value, name, label, weight, is_active";

/// Provides read operations for option values.
pub struct OptionValueRepo;

impl OptionValueRepo {
    /// Options in `group` whose stored value equals `value`.
    pub async fn list_by_value(
        pool: &PgPool,
        group: &str,
        value: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM option_values
             WHERE option_group = $1 AND value = $2
             ORDER BY weight ASC, id ASC"
        );
        sqlx::query_as::<_, OptionValue>(&query)
            .bind(group)
            .bind(value)
            .fetch_all(pool)
            .await
    }

    /// Options in `group` whose machine name equals `name`.
    pub async fn list_by_name(
        pool: &PgPool,
        group: &str,
        name: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM option_values
             WHERE option_group = $1 AND name = $2
             ORDER BY weight ASC, id ASC"
        );
        sqlx::query_as::<_, OptionValue>(&query)
            .bind(group)
            .bind(name)
            .fetch_all(pool)
            .await
    }
}
