//! Shared query parameter types for API handlers.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use volunteer_core::params::Params;
use volunteer_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Keys whose query-string value is a JSON document rather than a scalar.
const JSON_KEYS: [&str; 1] = ["project_contacts"];

/// Query parameters for `GET /volunteer-projects/active`.
#[derive(Debug, Deserialize)]
pub struct ActiveParams {
    pub entity_id: DbId,
    pub entity_table: String,
}

/// Query parameters for `GET /volunteer-projects/{id}/contacts`.
#[derive(Debug, Deserialize)]
pub struct RelationshipParams {
    /// Relationship type value (`"1"`) or machine name (`"volunteer_owner"`).
    pub relationship_type: String,
}

/// Turn a raw query string map into a parameter mapping.
///
/// Scalar values stay strings (the parameter helpers accept numeric strings);
/// `project_contacts` is parsed as JSON, e.g. `project_contacts={"5":[101]}`.
pub fn query_params(query: HashMap<String, String>) -> AppResult<Params> {
    query
        .into_iter()
        .map(|(key, raw)| {
            let value = if JSON_KEYS.contains(&key.as_str()) {
                serde_json::from_str(&raw)
                    .map_err(|e| AppError::BadRequest(format!("{key} is not valid JSON: {e}")))?
            } else {
                Value::String(raw)
            };
            Ok((key, value))
        })
        .collect()
}

/// Require a JSON request body to be an object.
pub fn body_params(body: Value) -> AppResult<Params> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest("Request body must be a JSON object".into())),
    }
}
