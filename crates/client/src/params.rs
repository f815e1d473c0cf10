//! Query parameters shared by every list/lookup endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed core of the JobBOSS2 query surface plus an explicit pass-through
/// map for dynamic filter expressions (`dueDate[gte]`, `status[in]`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryParams {
    /// Comma-separated list of fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    /// Sort expression (e.g. `-dateEntered,+customerCode`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Number of records to skip (pagination).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    /// Number of records to take (pagination).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<i64>,
    /// Dynamic filter parameters, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueryParams {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_none()
            && self.sort.is_none()
            && self.skip.is_none()
            && self.take.is_none()
            && self.extra.is_empty()
    }

    /// Flatten into `(key, value)` pairs for the request query string.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(fields) = &self.fields {
            pairs.push(("fields".to_string(), fields.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(take) = self.take {
            pairs.push(("take".to_string(), take.to_string()));
        }
        for (k, v) in &self.extra {
            pairs.push((k.clone(), value_to_string(v)));
        }
        pairs
    }
}

#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => value.to_string(),
    }
}
