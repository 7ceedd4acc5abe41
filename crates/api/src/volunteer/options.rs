//! Option-value lookups.
//!
//! Lookups that must resolve to a single option fail with
//! [`CoreError::Lookup`] when they find none or several.

use volunteer_core::error::CoreError;
use volunteer_core::types::DbId;
use volunteer_db::models::option_value::OptionValue;
use volunteer_db::store::VolunteerStore;

use crate::error::AppResult;

/// The single option in `group` with stored value `value`.
pub async fn get_single(
    store: &dyn VolunteerStore,
    group: &str,
    value: &str,
) -> AppResult<OptionValue> {
    let mut options = store.find_option_values(group, value).await?;
    if options.len() != 1 {
        return Err(CoreError::Lookup(format!(
            "Expected one option with value '{value}' in group '{group}' but found {}",
            options.len()
        ))
        .into());
    }
    Ok(options.remove(0))
}

/// The single option in `group` with machine name `name`.
pub async fn get_single_by_name(
    store: &dyn VolunteerStore,
    group: &str,
    name: &str,
) -> AppResult<OptionValue> {
    let mut options = store.find_option_values_by_name(group, name).await?;
    if options.len() != 1 {
        return Err(CoreError::Lookup(format!(
            "Expected one option named '{name}' in group '{group}' but found {}",
            options.len()
        ))
        .into());
    }
    Ok(options.remove(0))
}

/// Label of the option in `group` whose value is `value`, if any.
pub async fn label(
    store: &dyn VolunteerStore,
    group: &str,
    value: DbId,
) -> AppResult<Option<String>> {
    let options = store.find_option_values(group, &value.to_string()).await?;
    Ok(options.into_iter().next().map(|o| o.label))
}

/// Parse an option's stored value as an id.
pub fn value_as_id(option: &OptionValue) -> AppResult<DbId> {
    option.value.parse().map_err(|_| {
        CoreError::Internal(format!(
            "Option '{}' in group '{}' has non-integer value '{}'",
            option.name, option.option_group, option.value
        ))
        .into()
    })
}
