//! Query-parameter cleaning.

use serde_json::{Map, Value};

/// Placeholder the filter widgets use for "no preference".
pub const ANY: &str = "any";

/// Drop parameters that carry no filter.
///
/// Removed: nulls, empty strings, the literal `"any"`, and arrays whose
/// elements are all null (an untouched range slider sends `[null, null]`).
pub fn clean_params(params: Map<String, Value>) -> Map<String, Value> {
    params
        .into_iter()
        .filter(|(_, value)| is_meaningful(value))
        .collect()
}

fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty() && s != ANY,
        Value::Array(items) => items.iter().any(|v| !v.is_null()),
        _ => true,
    }
}
