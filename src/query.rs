//! Encoding of request data as URL query parameters.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// An ordered list of query parameters.
pub type QueryPairs = Vec<(String, String)>;

/// Encodes a flat serializable value as query parameters.
///
/// `data` must serialize to a JSON object (or `null`, meaning no
/// parameters). Strings, numbers and booleans are encoded directly, lists
/// of scalars are comma-joined and `null` members are skipped. Nested
/// objects cannot be expressed and fail with [`Error::Encoding`].
pub fn encode<T: Serialize + ?Sized>(data: &T) -> Result<QueryPairs> {
    let value = serde_json::to_value(data)
        .map_err(|e| Error::Encoding(format!("Unable to serialize query data: {}", e)))?;

    let object = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(object) => object,
        other => {
            return Err(Error::Encoding(format!(
                "Query data must be a struct or map, got {}",
                kind_of(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        if let Some(encoded) = encode_value(&key, value)? {
            pairs.push((key, encoded));
        }
    }
    Ok(pairs)
}

/// Overlays `pairs` onto `base`, replacing parameters of the same name.
pub fn overlay(base: &mut QueryPairs, pairs: QueryPairs) {
    for (key, value) in pairs {
        match base.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => base.push((key, value)),
        }
    }
}

/// Renders parameters as an `application/x-www-form-urlencoded` string.
pub fn to_query_string(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn encode_value(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) => Ok(Some(s)),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Array(_) | Value::Object(_) => {
                        return Err(Error::Encoding(format!(
                            "Query parameter {} contains a nested {}",
                            key,
                            kind_of(&item)
                        )))
                    }
                    Value::Null => {}
                    other => {
                        if let Some(part) = encode_value(key, other)? {
                            parts.push(part);
                        }
                    }
                }
            }
            if parts.is_empty() {
                Ok(None)
            } else {
                Ok(Some(parts.join(",")))
            }
        }
        Value::Object(_) => Err(Error::Encoding(format!(
            "Query parameter {} is an object and cannot be encoded",
            key
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
