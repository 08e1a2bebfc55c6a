//! Field deserializers that never fail on a present-but-odd value.
//!
//! Model output drifts: numbers arrive as `"$45/hr"`, lists as comma strings,
//! fields as `null`. Each helper maps whatever arrived onto the field's zero
//! value instead of rejecting the whole payload. Used with `#[serde(default)]`
//! so absent fields are zero-filled too.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(as_string(&Value::deserialize(d)?))
}

pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .iter()
            .map(as_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_list(&s),
        _ => Vec::new(),
    })
}

pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(as_number(&Value::deserialize(d)?))
}

pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "correct"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// `null` becomes `T::default()`; any other value must still match `T`.
pub fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Non-negative whole number; fractional values are rounded.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(to_count(as_number(&Value::deserialize(d)?)))
}

pub(crate) fn to_count(n: f64) -> u32 {
    if n.is_finite() && n > 0.0 {
        n.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

pub(crate) fn as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn as_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Splits a comma-separated list, dropping blanks.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// First number in a string such as `"$1,250.50/hr"`.
fn leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let negative = s[..start].ends_with('-');
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    let n: f64 = digits.trim_end_matches('.').parse().ok()?;
    Some(if negative { -n } else { n })
}
