//! Loosely typed request parameters.
//!
//! API operations receive a mapping of name to JSON value. Callers send ids as
//! numbers or numeric strings and flags as booleans, integers or strings, so
//! the helpers here coerce on read instead of deserializing into fixed types.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::DbId;

/// Parameter mapping passed into every API operation.
pub type Params = Map<String, Value>;

/// Returns `true` for values that count as "not provided".
///
/// `null`, `false`, numeric zero, `""`, `"0"` and empty arrays/objects are
/// all empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Returns `true` if `key` is present in `params` with a non-empty value.
pub fn has_value(params: &Params, key: &str) -> bool {
    params.get(key).is_some_and(|v| !is_empty_value(v))
}

/// Coerce a JSON value into an id. Accepts integers and integer-like strings.
pub fn value_as_id(value: &Value) -> Option<DbId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read an optional integer parameter.
///
/// Absent and `null` yield `Ok(None)`; anything that is not an integer is a
/// validation error naming the parameter.
pub fn id_param(params: &Params, key: &str) -> Result<Option<DbId>, CoreError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => value_as_id(v)
            .map(Some)
            .ok_or_else(|| CoreError::Validation(format!("{key} must be an integer"))),
    }
}

/// Read a parameter that may be a single id or a list of ids.
///
/// Accepted shapes: `5`, `"5"`, `"5,6"`, `[5, "6"]` and `{"IN": [5, 6]}`.
pub fn id_list_param(params: &Params, key: &str) -> Result<Option<Vec<DbId>>, CoreError> {
    let Some(value) = params.get(key) else {
        return Ok(None);
    };
    let invalid = || CoreError::Validation(format!("{key} must be an integer or list of integers"));

    let ids = match value {
        Value::Null => return Ok(None),
        Value::Number(_) => vec![value_as_id(value).ok_or_else(invalid)?],
        Value::String(s) => s
            .split(',')
            .map(|part| part.trim().parse::<DbId>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?,
        Value::Array(items) => items
            .iter()
            .map(|item| value_as_id(item).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(map) => match map.get("IN") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| value_as_id(item).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(invalid()),
        },
        Value::Bool(_) => return Err(invalid()),
    };
    Ok(Some(ids))
}

/// Read an optional string parameter. Numbers are rendered to strings.
pub fn string_param(params: &Params, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns `true` if `key` holds a truthy value.
pub fn flag_param(params: &Params, key: &str) -> bool {
    has_value(params, key)
}
