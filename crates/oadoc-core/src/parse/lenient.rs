//! Field readers for the input model. A field that holds the wrong kind of
//! JSON value reads as absent instead of failing the whole document; list and
//! map entries that cannot be read are dropped one by one.

use indexmap::IndexMap;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, numbers and booleans are rendered as text; anything
/// else (including `null`) is absent.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Like [`string`], defaulting to the empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.unwrap_or_default())
}

/// Only a literal `true` counts.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// A boolean, or absent when the value is anything else.
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(Some(b)),
        _ => Ok(None),
    }
}

/// Scalar items of an array, as text. A non-array reads as empty.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().filter_map(scalar_text).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Array items that read as `T`; the rest are dropped with a warning.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| read(item, || format!("item {index}")))
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!("expected an array, found {other}; ignoring it");
            Ok(Vec::new())
        }
    }
}

/// Object entries that read as `T`, in declaration order; the rest are
/// dropped with a warning.
pub fn map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(entries) => Ok(entries
            .into_iter()
            .filter_map(|(key, entry)| {
                let parsed = read(entry, || format!("entry `{key}`"))?;
                Some((key, parsed))
            })
            .collect()),
        Value::Null => Ok(IndexMap::new()),
        other => {
            warn!("expected an object, found {other}; ignoring it");
            Ok(IndexMap::new())
        }
    }
}

/// A `T`, or absent when the value is `null` or does not read as one.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(read(value, || "value".to_string())),
    }
}

/// A `T`, or its default when the value does not read as one.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(optional(deserializer)?.unwrap_or_default())
}

fn read<T: DeserializeOwned>(value: Value, what: impl FnOnce() -> String) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("skipping unreadable {}: {err}", what());
            None
        }
    }
}

/// Numbers print the way JavaScript prints them, so a YAML `1.0` reads as `"1"`.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            (None, None, None) => n.to_string(),
        }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
