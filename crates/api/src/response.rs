//! Shared response envelope for API handlers.
//!
//! Every successful response uses the `{ "is_error": 0, "count": n,
//! "values": ... }` envelope the host application's API clients expect.
//! Errors carry `"is_error": 1` (see [`crate::error::AppError`]).

use std::collections::BTreeMap;

use serde::Serialize;

/// Standard `{ "is_error": 0, "count": n, "values": T }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ValuesResponse::list(records)))
/// ```
#[derive(Debug, Serialize)]
pub struct ValuesResponse<T: Serialize> {
    pub is_error: u8,
    pub count: usize,
    pub values: T,
}

impl<T: Serialize> ValuesResponse<Vec<T>> {
    /// Wrap a list, counting its entries.
    pub fn list(values: Vec<T>) -> Self {
        Self {
            is_error: 0,
            count: values.len(),
            values,
        }
    }
}

impl<T: Serialize> ValuesResponse<T> {
    /// Wrap a single value (a record, a flag, an optional id).
    pub fn single(values: T) -> Self {
        Self {
            is_error: 0,
            count: 1,
            values,
        }
    }
}

impl<K: Serialize + Ord, V: Serialize> ValuesResponse<BTreeMap<K, V>> {
    /// Wrap a keyed map (e.g. project id → project), counting its entries.
    pub fn map(values: BTreeMap<K, V>) -> Self {
        Self {
            is_error: 0,
            count: values.len(),
            values,
        }
    }
}
