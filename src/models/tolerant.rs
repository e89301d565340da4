//! Ordered candidate-key lookup for backend JSON.
//!
//! The backend is not consistent about key names (`id` vs `_id`, `name` vs
//! `username`, several avatar keys). Each DTO field lists its candidate keys
//! in priority order and the first present one wins. Decoding never fails
//! because a preferred key is missing.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Returns the first candidate that is present, or `default`
pub fn first_present<T>(candidates: impl IntoIterator<Item = Option<T>>, default: T) -> T {
    candidates.into_iter().flatten().next().unwrap_or(default)
}

/// First non-null value among `keys`
pub fn lookup<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// First non-empty string among `keys`. Numeric ids are stringified.
pub fn string_field(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

pub fn string_or_empty(obj: &Value, keys: &[&str]) -> String {
    first_present([string_field(obj, keys)], String::new())
}

/// First value among `keys` readable as a number, including numeric strings
pub fn f64_field(obj: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}

pub fn u32_field(obj: &Value, keys: &[&str]) -> Option<u32> {
    f64_field(obj, keys)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u32)
}

pub fn bool_field(obj: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        })
}

/// First RFC 3339 timestamp among `keys`
pub fn datetime_field(obj: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(|value| value.as_str())
        .find_map(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// First array of strings among `keys`; non-string entries are skipped
pub fn string_list(obj: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| value.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Unwraps a list payload that may be a bare array or wrapped under one of `keys`
pub fn list_payload(body: Value, keys: &[&str]) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
