use serde_json::{json, Value};

/// Build an equality predicate in the upstream backend's filter syntax:
/// `{field: {"$eq": value}}`. All filter construction lives here; new
/// predicate kinds (range, membership) belong in this module, not inline
/// in route handlers.
pub fn equals(field: &str, value: &str) -> Value {
    json!({ field: { "$eq": value } })
}

/// Serialize a filter expression to the JSON string the upstream delete
/// and search endpoints expect as a query parameter.
pub fn to_query_param(filter: &Value) -> String {
    filter.to_string()
}
