//! Rules for volunteer project parameters.
//!
//! A project is created either against an existing `id` (an update) or from
//! the minimum triple `entity_id`, `entity_table`, `title`. The active flag is
//! coerced to exactly `0` or `1` whenever it is supplied.

use serde_json::Value;

use crate::error::CoreError;
use crate::params::{has_value, id_param, string_param, value_as_id, Params};
use crate::types::DbId;

/// `entity_table` value for projects attached to an event.
pub const ENTITY_TABLE_EVENT: &str = "event";

/// Returns `true` if `params` carry the absolute minimum to save a project.
pub fn data_exists(params: &Params) -> bool {
    if has_value(params, "id") {
        return true;
    }
    has_value(params, "entity_id")
        && has_value(params, "entity_table")
        && has_value(params, "title")
}

/// Returns `true` if `value` represents an "off" flag.
///
/// Only `false`, the integer `0` and the string `"0"` are off; the comparison
/// is type-strict, so `""`, `null` and `"false"` are not.
pub fn is_off(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_i64() == Some(0) || n.as_u64() == Some(0),
        Value::String(s) => s == "0",
        _ => false,
    }
}

/// Coerce an explicitly supplied `is_active` to `0` or `1`.
///
/// An absent key stays absent so that searches can leave the active state
/// unspecified.
pub fn normalize_is_active(params: &mut Params) {
    if let Some(value) = params.get_mut("is_active") {
        *value = Value::from(if is_off(value) { 0 } else { 1 });
    }
}

/// Column values copied out of a parameter mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectValues {
    pub id: Option<DbId>,
    pub entity_id: Option<DbId>,
    pub entity_table: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Normalize `is_active` in place, then copy the project columns out of
/// `params`. Unknown keys are ignored.
pub fn copy_values(params: &mut Params) -> Result<ProjectValues, CoreError> {
    normalize_is_active(params);
    Ok(ProjectValues {
        id: id_param(params, "id")?,
        entity_id: id_param(params, "entity_id")?,
        entity_table: string_param(params, "entity_table"),
        title: string_param(params, "title"),
        description: string_param(params, "description"),
        is_active: params.get("is_active").map(|v| v.as_i64() == Some(1)),
    })
}

/// A relationship type given either by option value or by machine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipRef {
    Value(DbId),
    Name(String),
}

impl RelationshipRef {
    /// Interpret a mapping key or parameter: integer-like means value.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<DbId>() {
            Ok(v) => RelationshipRef::Value(v),
            Err(_) => RelationshipRef::Name(raw.to_string()),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(_) => value_as_id(value).map(RelationshipRef::Value),
            Value::String(s) if !s.is_empty() => Some(Self::parse(s)),
            _ => None,
        }
    }
}

/// Parse a `project_contacts` mapping of relationship type to contact ids.
///
/// The shape is `{"<type value or name>": [contact_id, ...]}`; a bare id is
/// treated as a one-element list.
pub fn parse_project_contacts(
    value: &Value,
) -> Result<Vec<(RelationshipRef, Vec<DbId>)>, CoreError> {
    let invalid = |msg: &str| CoreError::Validation(format!("project_contacts {msg}"));
    let map = value
        .as_object()
        .ok_or_else(|| invalid("must map relationship types to contact ids"))?;

    map.iter()
        .map(|(rel, contacts)| {
            let ids = match contacts {
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        value_as_id(item)
                            .ok_or_else(|| invalid("contains a non-integer contact id"))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => vec![value_as_id(other)
                    .ok_or_else(|| invalid("contains a non-integer contact id"))?],
            };
            Ok((RelationshipRef::parse(rel), ids))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn data_exists_with_id_ignores_other_fields() {
        assert!(data_exists(&params(json!({"id": 4}))));
        assert!(data_exists(&params(json!({"id": "4", "title": ""}))));
    }

    #[test]
    fn data_exists_requires_entity_triple_without_id() {
        assert!(data_exists(&params(
            json!({"entity_id": 1, "entity_table": "event", "title": "Cleanup"})
        )));
        assert!(!data_exists(&params(json!({"entity_id": 1, "entity_table": "event"}))));
        assert!(!data_exists(&params(
            json!({"entity_id": 1, "entity_table": "event", "title": ""})
        )));
        assert!(!data_exists(&params(
            json!({"entity_id": 0, "entity_table": "event", "title": "x"})
        )));
        assert!(!data_exists(&params(json!({}))));
    }

    #[test]
    fn is_off_is_type_strict() {
        assert!(is_off(&json!(false)));
        assert!(is_off(&json!(0)));
        assert!(is_off(&json!("0")));

        assert!(!is_off(&json!(1)));
        assert!(!is_off(&json!("")));
        assert!(!is_off(&json!(null)));
        assert!(!is_off(&json!("false")));
        assert!(!is_off(&json!(true)));
    }

    #[test]
    fn copy_values_normalizes_explicit_is_active() {
        let mut p = params(json!({"id": 3, "is_active": "0"}));
        let values = copy_values(&mut p).unwrap();
        assert_eq!(p["is_active"], json!(0));
        assert_eq!(values.is_active, Some(false));

        let mut p = params(json!({"id": 3, "is_active": "yes"}));
        let values = copy_values(&mut p).unwrap();
        assert_eq!(p["is_active"], json!(1));
        assert_eq!(values.is_active, Some(true));
    }

    #[test]
    fn copy_values_leaves_missing_is_active_unset() {
        let mut p = params(json!({"id": 3, "title": "Renamed"}));
        let values = copy_values(&mut p).unwrap();
        assert!(!p.contains_key("is_active"));
        assert_eq!(values.is_active, None);
        assert_eq!(values.title.as_deref(), Some("Renamed"));
    }

    #[test]
    fn copy_values_rejects_non_integer_ids() {
        let mut p = params(json!({"entity_id": "abc"}));
        assert!(copy_values(&mut p).is_err());
    }

    #[test]
    fn relationship_ref_parses_values_and_names() {
        assert_eq!(RelationshipRef::parse("5"), RelationshipRef::Value(5));
        assert_eq!(
            RelationshipRef::parse("volunteer_owner"),
            RelationshipRef::Name("volunteer_owner".into())
        );
        assert_eq!(RelationshipRef::from_value(&json!(2)), Some(RelationshipRef::Value(2)));
        assert_eq!(RelationshipRef::from_value(&json!(null)), None);
    }

    #[test]
    fn parse_project_contacts_mapping() {
        let parsed = parse_project_contacts(&json!({"3": [10, "11"], "manager": 12})).unwrap();
        assert_eq!(
            parsed,
            vec![
                (RelationshipRef::Value(3), vec![10, 11]),
                (RelationshipRef::Name("manager".into()), vec![12]),
            ]
        );
        assert!(parse_project_contacts(&json!([1, 2])).is_err());
        assert!(parse_project_contacts(&json!({"3": ["x"]})).is_err());
    }
}
