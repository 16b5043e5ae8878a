//! Lenient `serde` field decoders for backend payloads.
//!
//! The aggregation backend passes numbers through from the ad platforms, and
//! those APIs are inconsistent: Meta returns `"spend": "12.50"`, Google
//! returns plain numbers, and a missing metric can show up as `null`, `""`,
//! or not at all. Every metric field goes through these helpers so the rest
//! of the workspace only ever sees numbers.
//!
//! Use together with `#[serde(default)]` so absent fields also land on zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value to `f64`.
///
/// Numbers pass through, numeric strings are parsed, and everything else
/// (including `NaN`/`inf` strings) becomes `0.0`.
#[must_use]
pub fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Coerces a JSON value to a non-negative count. Fractions truncate.
#[must_use]
pub fn coerce_u64(value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    if let Value::String(s) = value {
        if let Ok(n) = s.trim().parse::<u64>() {
            return n;
        }
    }
    let float = coerce_f64(value);
    if float <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = float as u64;
    count
}

/// `deserialize_with` helper for `f64` metrics.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0.0, coerce_f64))
}

/// `deserialize_with` helper for count metrics.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, coerce_u64))
}

/// `deserialize_with` helper for optional amounts such as budgets.
///
/// `null`, empty strings, and unparsable strings become `None` rather than
/// zero, since "no budget" and "zero budget" mean different things.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// `deserialize_with` helper for booleans that may arrive as `null`.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    })
}

/// `deserialize_with` helper for identifiers that may be numbers or strings.
///
/// Google Ads ids are 64-bit integers and Shopify's are too; Meta's are
/// numeric strings. Everything is kept as a string so ids from all three
/// platforms share one key space.
///
/// # Errors
///
/// Fails when the value is neither a string nor a number.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or numeric id, got {other}"
        ))),
    }
}

/// Like [`id`], for optional back-references.
///
/// # Errors
///
/// Fails when a present value is neither a string nor a number.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or numeric id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::f64")]
        value: f64,
        #[serde(default, deserialize_with = "super::u64")]
        count: u64,
        #[serde(default, deserialize_with = "super::opt_f64")]
        budget: Option<f64>,
    }

    #[test]
    fn numeric_string_parses() {
        let p: Sample = serde_json::from_value(json!({ "value": "12.5" })).unwrap();
        assert!((p.value - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn plain_number_passes_through() {
        let p: Sample = serde_json::from_value(json!({ "value": 12.5 })).unwrap();
        assert!((p.value - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_field_is_zero() {
        let p: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(p.value.abs() < f64::EPSILON);
        assert_eq!(p.count, 0);
        assert!(p.budget.is_none());
    }

    #[test]
    fn garbage_and_null_are_zero() {
        let p: Sample =
            serde_json::from_value(json!({ "value": "n/a", "count": null })).unwrap();
        assert!(p.value.abs() < f64::EPSILON);
        assert_eq!(p.count, 0);
    }

    #[test]
    fn non_finite_strings_are_zero() {
        assert!(coerce_f64(&json!("NaN")).abs() < f64::EPSILON);
        assert!(coerce_f64(&json!("inf")).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_accept_strings_and_floats() {
        assert_eq!(coerce_u64(&json!("1500")), 1500);
        assert_eq!(coerce_u64(&json!(42.9)), 42);
        assert_eq!(coerce_u64(&json!(-3)), 0);
    }

    #[test]
    fn budget_keeps_absence_distinct_from_zero() {
        let p: Sample = serde_json::from_value(json!({ "budget": "0" })).unwrap();
        assert_eq!(p.budget, Some(0.0));
        let p: Sample = serde_json::from_value(json!({ "budget": "" })).unwrap();
        assert!(p.budget.is_none());
    }
}
