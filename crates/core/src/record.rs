//! Attribute records
//!
//! A record is the JSON view of an AWS response. Probes expose typed
//! accessors for the fields they know about; the record gives generic,
//! name-based access to every field the response carried.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Response attributes keyed by field name, with null fields removed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceRecord(Map<String, Value>);

impl ResourceRecord {
    /// Build a record from a serializable response
    pub fn from_response<T: Serialize>(response: &T) -> Result<Self> {
        match serde_json::to_value(response)? {
            Value::Object(map) => Ok(Self(strip_nulls(map))),
            other => Err(Error::General(format!(
                "expected an object response, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Top-level attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Nested attribute addressed by a dotted path, e.g. `tags.env`.
    ///
    /// A full-name match at any level wins over splitting, so map keys that
    /// contain dots (`gatewayresponse.header.Access-Control-Allow-Origin`)
    /// stay reachable.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        lookup(&self.0, path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }

    let mut split = path.match_indices('.').map(|(i, _)| i);
    split.find_map(|i| match map.get(&path[..i]) {
        Some(Value::Object(inner)) => lookup(inner, &path[i + 1..]),
        _ => None,
    })
}

fn strip_nulls(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(k, v)| match v {
            Value::Null => None,
            Value::Object(inner) => Some((k, Value::Object(strip_nulls(inner)))),
            other => Some((k, other)),
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
