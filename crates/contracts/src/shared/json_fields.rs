//! Lenient accessors over loosely shaped JSON records.
//!
//! Backend versions disagree on field names and types, so every accessor
//! treats `null`, missing keys and empty strings as "absent".

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-empty string at `key`.
pub fn text<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First non-empty string among `keys`.
pub fn first_text<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| text(record, key))
}

/// Number at `key`; numeric strings such as `"120.50"` are accepted.
pub fn number(record: &Value, key: &str) -> Option<f64> {
    as_number(record.get(key)?)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Serde field helper: an amount sent as `85`, `85.0` or `"85.00"`.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    as_number(&raw).ok_or_else(|| D::Error::custom(format!("expected an amount, got {raw}")))
}

/// Serde field helper: a whole count sent as `2`, `2.0` or `"2"`.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    as_number(&raw)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
        .ok_or_else(|| D::Error::custom(format!("expected a whole count, got {raw}")))
}

/// First number among `keys`.
pub fn first_number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| number(record, key))
}

/// Walks nested objects, e.g. `nested(record, &["atributos", "presentaciones"])`.
pub fn nested<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(record, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}

/// Boolean at `key`; `"true"`/`"false"` strings and 0/1 are accepted.
pub fn flag(record: &Value, key: &str) -> Option<bool> {
    match record.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        _ => None,
    }
}
