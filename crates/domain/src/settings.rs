//! Site settings key flattening.
//!
//! The settings endpoint stores one row per dotted key
//! (`general.logo_url`, `contact.hotline`, ...). Writers flatten a
//! nested JSON document into that shape for `/settings/bulk_update/`;
//! readers rebuild the nested document from the flat rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// One settings row as returned by `/settings/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// Dotted key, e.g. `general.logo_url`.
    pub setting_key: String,
    /// Stored value; the row store is untyped strings.
    #[serde(default)]
    pub setting_value: Option<String>,
    /// Declared value kind (`text`, `json`, `number`, ...).
    #[serde(default)]
    pub setting_type: Option<String>,
    /// Group, derived from the first key segment.
    #[serde(default)]
    pub setting_group: Option<String>,
    /// Whether the row is readable without authentication.
    #[serde(default)]
    pub is_public: bool,
}

/// Flattens a nested settings document into dotted string keys.
///
/// Leaf conversion rules, matching what the backend accepts:
/// - nested objects recurse with a `.`-joined prefix
/// - arrays are JSON-stringified into a single value
/// - null leaves and empty strings are dropped entirely
/// - numbers and booleans are stringified
///
/// A non-object input produces an empty map.
#[must_use]
pub fn flatten_settings(settings: &Value) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    if let Value::Object(map) = settings {
        flatten_into(map, None, &mut flat);
    }
    flat
}

fn flatten_into(map: &Map<String, Value>, prefix: Option<&str>, out: &mut BTreeMap<String, String>) {
    for (key, value) in map {
        let full_key = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(nested, Some(&full_key), out),
            Value::Null => {}
            Value::Array(_) => {
                out.insert(full_key, value.to_string());
            }
            Value::String(s) => {
                if !s.is_empty() {
                    out.insert(full_key, s.clone());
                }
            }
            Value::Number(n) => {
                out.insert(full_key, n.to_string());
            }
            Value::Bool(b) => {
                out.insert(full_key, b.to_string());
            }
        }
    }
}

/// Rebuilds a nested settings document from dotted keys.
///
/// Values that look like JSON arrays are parsed back into arrays;
/// everything else stays a string (the row store is untyped, so
/// guessing at numbers would corrupt values like phone numbers).
///
/// # Errors
///
/// Returns an error if a key is empty, contains an empty segment, or
/// maps to both a leaf and a nested group.
pub fn unflatten_settings<'a, I>(entries: I) -> DomainResult<Value>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut root = Map::new();
    for (key, value) in entries {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(DomainError::InvalidSettingKey(key.to_string()));
        }

        let mut segments = key.split('.').peekable();
        let mut cursor = &mut root;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                match cursor.get(segment) {
                    Some(Value::Object(_)) => {
                        return Err(DomainError::ConflictingSettingKey(key.to_string()));
                    }
                    _ => {
                        cursor.insert(segment.to_string(), parse_leaf(value));
                    }
                }
            } else {
                let entry = cursor
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                match entry {
                    Value::Object(nested) => cursor = nested,
                    _ => return Err(DomainError::ConflictingSettingKey(key.to_string())),
                }
            }
        }
    }
    Ok(Value::Object(root))
}

fn parse_leaf(value: &str) -> Value {
    if value.starts_with('[') {
        if let Ok(parsed @ Value::Array(_)) = serde_json::from_str(value) {
            return parsed;
        }
    }
    Value::String(value.to_string())
}
